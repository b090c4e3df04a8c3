//! Calling the quotation service.
//!
//! The client makes one GET under a 300 ms budget and keeps only the `bid` of the
//! returned quote. Every failure comes back as a `QuoteError`; nothing here exits the
//! process or touches the output file.
use std::time::Duration;

use log::info;
use quote_common::http::get_body;
use quote_common::model::quote::unwrap_envelope;
use quote_common::net::CLIENT_BUDGET;
use quote_common::{Deadline, QuoteError, Result};
use reqwest::Client;
use serde::Deserialize;

/// The only field the client reads from the service response.
#[derive(Debug, Deserialize)]
struct BidOnly {
    bid: String,
}

/// Helper type for querying the quotation service.
#[derive(Debug, Clone)]
pub struct QuoteClient {
    http: Client,
    url: String,
    budget: Duration,
}

impl QuoteClient {
    /// Create a client for `url` with the default budget.
    pub fn new(http: Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
            budget: CLIENT_BUDGET,
        }
    }

    /// Override the call budget.
    pub fn with_budget(mut self, budget: Duration) -> Self {
        self.budget = budget;
        self
    }

    /// Fetch the current bid from the service.
    pub async fn fetch_bid(&self) -> Result<String> {
        let deadline = Deadline::start("client", self.budget);
        info!("Requesting quote from {}", self.url);
        let body = get_body(&self.http, &self.url, &deadline).await?;

        let quote: BidOnly = unwrap_envelope(&body)?;
        if quote.bid.trim().is_empty() {
            return Err(QuoteError::Decode("field `bid` is empty".to_string()));
        }
        Ok(quote.bid)
    }
}
