#![allow(dead_code)]

use std::path::Path;
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use quote_client::args::Args;
use tokio::net::TcpListener;

pub const SERVICE_BODY: &str = r#"{"USDBRL":{"code":"USD","codein":"BRL","name":"Dólar/Real","high":"5.50","low":"5.30","varBid":"0.01","pctChange":"0.2","bid":"5.43","ask":"5.44","timestamp":"123","create_date":"2024-01-01"}}"#;

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Stand-in for the quotation service answering `/cotacao` with a fixed reply.
pub async fn stub_service(status: StatusCode, body: &'static str, delay: Duration) -> String {
    let router = Router::new().route(
        "/cotacao",
        get(move || async move {
            tokio::time::sleep(delay).await;
            (status, body)
        }),
    );
    format!("{}/cotacao", serve(router).await)
}

pub fn args(url: &str, output: &Path) -> Args {
    Args {
        url: url.to_string(),
        output: output.to_path_buf(),
    }
}
