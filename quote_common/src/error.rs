//! Error types shared between client and server.
//!
//! The `QuoteError` enum covers every way one step of the quotation pipeline can
//! fail. Each variant carries its cause; [`QuoteError::kind`] collapses the variants
//! into the small [`FailureKind`] taxonomy used for logging and status mapping.
use std::io;
use std::time::Duration;

use strum_macros::Display;
use thiserror::Error;

/// Coarse failure classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum FailureKind {
    /// A deadline expired on fetch, write, or client call.
    Timeout,
    /// Network-level failure other than a timeout.
    Transport,
    /// Malformed or unexpected JSON shape.
    Decode,
    /// Schema or write error not caused by a timeout.
    Storage,
    /// Local file-system error.
    Io,
}

/// Unified error type shared by client and server.
#[derive(Error, Debug)]
pub enum QuoteError {
    /// The deadline for `stage` expired before the operation completed.
    #[error("{stage} timeout after {}ms", budget.as_millis())]
    Timeout {
        /// Human-readable name of the bounded step (e.g. `request`, `database`).
        stage: &'static str,
        /// Budget that was exceeded.
        budget: Duration,
    },

    /// Connection, DNS or TLS failure.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The peer answered with a non-success HTTP status.
    #[error("Unexpected HTTP status: {0}")]
    UnexpectedStatus(u16),

    /// Body decoded as JSON but did not have the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Schema creation or row insert failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// I/O error originating from the standard library or sockets/files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl QuoteError {
    /// Failure class of this error.
    pub fn kind(&self) -> FailureKind {
        match self {
            QuoteError::Timeout { .. } => FailureKind::Timeout,
            QuoteError::Transport(_) | QuoteError::UnexpectedStatus(_) => FailureKind::Transport,
            QuoteError::Decode(_) | QuoteError::Json(_) => FailureKind::Decode,
            QuoteError::Storage(_) => FailureKind::Storage,
            QuoteError::Io(_) => FailureKind::Io,
        }
    }

    /// Returns `true` when a deadline caused this failure.
    pub fn is_timeout(&self) -> bool {
        self.kind() == FailureKind::Timeout
    }
}
