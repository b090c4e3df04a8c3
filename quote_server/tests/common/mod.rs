#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use quote_server::fetcher::QuoteFetcher;
use quote_server::service::AppState;
use quote_server::storage::QuoteStore;
use reqwest::Client;
use tokio::net::TcpListener;

pub const UPSTREAM_BODY: &str = r#"{"USDBRL":{"code":"USD","codein":"BRL","name":"Dólar/Real","high":"5.50","low":"5.30","varBid":"0.01","pctChange":"0.2","bid":"5.43","ask":"5.44","timestamp":"123","create_date":"2024-01-01"}}"#;

/// In-process stand-in for the pricing API.
#[derive(Clone)]
pub struct StubUpstream {
    pub healthy: Arc<AtomicBool>,
    pub hits: Arc<AtomicUsize>,
    pub delay: Duration,
    pub body: String,
}

impl StubUpstream {
    pub fn new(body: &str) -> Self {
        Self {
            healthy: Arc::new(AtomicBool::new(true)),
            hits: Arc::new(AtomicUsize::new(0)),
            delay: Duration::ZERO,
            body: body.to_string(),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn set_healthy(&self, healthy: bool) {
        self.healthy.store(healthy, Ordering::SeqCst);
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Serve on an ephemeral local port and return the quote URL.
    pub async fn spawn(&self) -> String {
        let app = Router::new()
            .route("/json/last/USD-BRL", get(stub_quote))
            .with_state(self.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/json/last/USD-BRL", addr)
    }
}

async fn stub_quote(State(stub): State<StubUpstream>) -> Response {
    stub.hits.fetch_add(1, Ordering::SeqCst);
    tokio::time::sleep(stub.delay).await;
    if !stub.healthy.load(Ordering::SeqCst) {
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    }
    ([(header::CONTENT_TYPE, "application/json")], stub.body.clone()).into_response()
}

/// Store in `dir` with the schema in place and a write budget loose enough for CI.
pub async fn temp_store(dir: &Path) -> QuoteStore {
    let store = QuoteStore::open(dir.join("quote.db"))
        .await
        .unwrap()
        .with_write_budget(Duration::from_secs(1));
    store.ensure_schema().await.unwrap();
    store
}

pub fn fetcher(url: &str) -> QuoteFetcher {
    QuoteFetcher::new(Client::new(), url)
}

pub async fn state(dir: &Path, url: &str) -> AppState {
    AppState::new(fetcher(url), temp_store(dir).await)
}
