//! Command-line arguments for the Quote Client.
//!
//! This module defines the CLI interface using `clap`. Both flags default to the fixed
//! values, so the client normally runs with no arguments. See `main` for usage.
use std::path::PathBuf;

use clap::Parser;
use quote_common::net::{OUTPUT_PATH, SERVICE_URL};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Quotation service endpoint.
    #[clap(long, default_value = SERVICE_URL)]
    pub url: String,

    /// File the bid is written to; replaced on every successful run.
    #[clap(long, default_value = OUTPUT_PATH)]
    pub output: PathBuf,
}
