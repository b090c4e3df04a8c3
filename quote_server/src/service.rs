//! HTTP quotation endpoint: fetch → persist → respond.
//!
//! The three steps run strictly in order inside the request task. Any failure stops
//! the pipeline and answers `500` with an empty body; the failure kind and cause are
//! only logged. A failed request leaves nothing behind, so the next one starts clean.
use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use log::{error, info};
use quote_common::net::QUOTATION_PATH;
use quote_common::{ExchangeQuote, FailureKind, QuoteError, Result};

use crate::fetcher::QuoteFetcher;
use crate::storage::QuoteStore;

/// Shared per-process state handed to every request.
#[derive(Debug, Clone)]
pub struct AppState {
    pub fetcher: QuoteFetcher,
    pub store: QuoteStore,
}

impl AppState {
    pub fn new(fetcher: QuoteFetcher, store: QuoteStore) -> Self {
        Self { fetcher, store }
    }
}

/// A failed pipeline step with its classified cause.
#[derive(Debug)]
pub struct ServiceError {
    /// Pipeline step that failed (`fetch`, `persist` or `encode`).
    pub stage: &'static str,
    pub kind: FailureKind,
    pub cause: QuoteError,
}

impl ServiceError {
    fn at(stage: &'static str) -> impl FnOnce(QuoteError) -> Self {
        move |cause| Self {
            stage,
            kind: cause.kind(),
            cause,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        error!("Quotation {} failed [{}]: {}", self.stage, self.kind, self.cause);
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}

/// Build the service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(QUOTATION_PATH, get(handle_quotation))
        .with_state(state)
}

/// Run one fetch-and-persist cycle, returning the quote and its row id.
pub async fn fetch_and_store(state: &AppState) -> Result<(ExchangeQuote, i64), ServiceError> {
    let quote = state.fetcher.fetch().await.map_err(ServiceError::at("fetch"))?;
    let id = state
        .store
        .insert(&quote)
        .await
        .map_err(ServiceError::at("persist"))?;
    info!("Stored {} bid={} as row {}", quote.pair(), quote.bid, id);
    Ok((quote, id))
}

async fn handle_quotation(State(state): State<AppState>) -> Result<Response, ServiceError> {
    let (quote, _) = fetch_and_store(&state).await?;
    let body = quote
        .to_envelope_bytes()
        .map_err(ServiceError::at("encode"))?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response())
}
