//! Data model types used by the client.
//!
//! - `quote_file`: the `{"Dollar": ...}` projection written to disk.
pub mod quote_file;
