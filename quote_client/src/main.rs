//! Quote Client: asks the quotation service for the current USD/BRL quote and saves
//! the bid to a local file as `{"Dollar":"<bid>"}`.
//!
//! Usage example (CLI):
//! ```bash
//! quote_client
//! quote_client --url http://192.168.0.10:8080/cotacao --output ./dollar.json
//! ```
//!
//! Exit status is `0` when the file was written and `1` on any failure, in which case
//! the previous file (if any) is left untouched.
#![warn(missing_docs)]
use std::process::ExitCode;

use clap::Parser;
use log::error;
use quote_client::args::Args;
use quote_client::run;

#[tokio::main]
async fn main() -> ExitCode {
    init_logger();
    let args = Args::parse();

    match run(&args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Quote not saved [{}]: {}", e.kind(), e);
            ExitCode::FAILURE
        }
    }
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
