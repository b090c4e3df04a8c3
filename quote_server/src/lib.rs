//! Quotation server library.
//!
//! - `args`: CLI flags (all defaulting to the fixed endpoints).
//! - `fetcher`: deadline-bounded GET against the pricing API.
//! - `storage`: append-only SQLite table of fetched quotes.
//! - `service`: the `/cotacao` handler composing fetcher and storage.
pub mod args;
pub mod fetcher;
pub mod service;
pub mod storage;

use quote_common::{QuoteError, Result};
use reqwest::Client;

use crate::args::Args;
use crate::fetcher::QuoteFetcher;
use crate::service::AppState;
use crate::storage::QuoteStore;

/// Open storage, create the schema and build the HTTP client.
///
/// Schema creation failure is returned to the caller; the server must not start
/// with a broken table.
pub async fn build_state(args: &Args) -> Result<AppState> {
    let store = QuoteStore::open(&args.database).await?;
    store.ensure_schema().await?;

    let client = Client::builder()
        .build()
        .map_err(|e| QuoteError::Transport(e.to_string()))?;
    let fetcher = QuoteFetcher::new(client, args.upstream_url.clone());
    Ok(AppState::new(fetcher, store))
}
