//!
//! Common types and utilities shared by the quotation server and client.
//!
//! This crate aggregates:
//! - `error`: unified error type `QuoteError` and its `FailureKind` taxonomy.
//! - `result`: handy `Result<T, QuoteError>` alias.
//! - `deadline`: per-step timeout budgets.
//! - `http`: deadline-bounded GET used by both processes.
//! - `model`: the `ExchangeQuote` record and envelope helpers.
//! - `net`: fixed endpoints, file names and budgets.
#![warn(missing_docs)]
pub mod deadline;
pub mod error;
pub mod http;
pub mod model;
pub mod net;
pub mod result;

pub use deadline::Deadline;
pub use error::{FailureKind, QuoteError};
pub use model::quote::ExchangeQuote;
pub use result::Result;
