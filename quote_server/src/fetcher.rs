//! Quote fetcher: one deadline-bounded GET against the pricing API.
//!
//! The fetcher makes exactly one attempt per call. A slow upstream is cut off at the
//! fetch budget (200 ms by default) and reported as a timeout; connection problems and
//! non-success statuses are transport failures; a body that does not unwrap into a
//! complete [`ExchangeQuote`] is a decode failure.
use std::time::Duration;

use log::debug;
use quote_common::http::get_body;
use quote_common::net::FETCH_BUDGET;
use quote_common::{Deadline, ExchangeQuote, Result};
use reqwest::Client;

/// Fetches the current quote from a fixed upstream URL.
#[derive(Debug, Clone)]
pub struct QuoteFetcher {
    client: Client,
    url: String,
    budget: Duration,
}

impl QuoteFetcher {
    /// Create a fetcher for `url` with the default fetch budget.
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            budget: FETCH_BUDGET,
        }
    }

    /// Override the fetch budget.
    pub fn with_budget(mut self, budget: Duration) -> Self {
        self.budget = budget;
        self
    }

    /// Upstream URL this fetcher queries.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch and decode one quote.
    pub async fn fetch(&self) -> Result<ExchangeQuote> {
        let deadline = Deadline::start("request", self.budget);
        let body = get_body(&self.client, &self.url, &deadline).await?;
        let quote = ExchangeQuote::from_envelope(&body)?;
        debug!("Fetched {} bid={} ask={}", quote.pair(), quote.bid, quote.ask);
        Ok(quote)
    }
}
