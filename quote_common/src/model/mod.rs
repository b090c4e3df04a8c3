//! Data model types exchanged between the pricing API, the server and the client.
//!
//! - `quote`: `ExchangeQuote` and the pair-envelope (de)serialization helpers.
pub mod quote;
