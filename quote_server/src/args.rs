//! Command-line arguments for the quotation server.
//!
//! Every flag defaults to the fixed production value, so starting the binary with no
//! arguments serves `/cotacao` on port 8080 backed by `./quote.db`.
use std::path::PathBuf;

use clap::Parser;
use quote_common::net::{DATABASE_PATH, SERVER_PORT, UPSTREAM_URL};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// TCP port to serve the quotation endpoint on.
    #[clap(long, default_value_t = SERVER_PORT)]
    pub port: u16,

    /// SQLite database file; created if missing.
    #[clap(long, default_value = DATABASE_PATH)]
    pub database: PathBuf,

    /// Pricing API queried on every request.
    #[clap(long, default_value = UPSTREAM_URL)]
    pub upstream_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_use_fixed_endpoints() {
        let args = Args::parse_from(["quote_server"]);
        assert_eq!(args.port, 8080);
        assert_eq!(args.database, PathBuf::from("quote.db"));
        assert_eq!(args.upstream_url, UPSTREAM_URL);
    }
}
