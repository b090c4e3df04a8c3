//! The file the client leaves behind: the bid under a fixed `Dollar` key.
use std::path::Path;

use quote_common::Result;
use serde::{Deserialize, Serialize};

/// Minimal projection of a quote persisted by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientQuoteFile {
    /// Bid value, verbatim from the service.
    #[serde(rename = "Dollar")]
    pub dollar: String,
}

impl ClientQuoteFile {
    /// Project a bid into the file shape.
    pub fn from_bid(bid: impl Into<String>) -> Self {
        Self { dollar: bid.into() }
    }

    /// Encode as `{"Dollar":"<bid>"}`.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Create or truncate `path` and write the encoded projection.
    pub async fn write_to(&self, path: &Path) -> Result<()> {
        let bytes = self.to_json_bytes()?;
        tokio::fs::write(path, bytes).await?;
        Ok(())
    }
}
