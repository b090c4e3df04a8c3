//! Quotation HTTP server.
//!
//! Serves `GET /cotacao`. Each request fetches the current USD/BRL quote from the
//! pricing API, appends it to the local SQLite table and answers with the quote as
//! JSON. It wires together three building blocks from the library:
//!
//! - `QuoteFetcher`: one GET per request, cut off after 200 ms.
//! - `QuoteStore`: one single-row insert per request, cut off after 10 ms.
//! - `service::router`: the axum route composing the two.
//!
//! Startup order matters: the schema is created before the listener is bound, and a
//! schema failure ends the process instead of serving requests that cannot persist.
//!
//! Bind address: `0.0.0.0:8080` unless `--port` says otherwise.
#![warn(missing_docs)]
use clap::Parser;
use log::{error, info};
use quote_common::Result;
use quote_common::net::{QUOTATION_PATH, addr};
use quote_server::args::Args;
use quote_server::build_state;
use quote_server::service::router;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    init_logger();
    let args = Args::parse();

    let state = build_state(&args).await?;
    info!(
        "Serving {} from {} (upstream {})",
        QUOTATION_PATH,
        args.database.display(),
        state.fetcher.url()
    );

    let listener = TcpListener::bind(addr("0.0.0.0", args.port)).await?;
    info!("HTTP server listening on: {}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Ctrl+C received. Shutting down server..."),
        Err(e) => {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
