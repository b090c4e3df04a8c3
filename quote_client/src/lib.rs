//! Quote Client library: fetch the bid from the quotation service and write it to a
//! local file.
//!
//! - `args`: CLI flags (defaulting to the fixed URL and file name).
//! - `client`: deadline-bounded call against the service.
//! - `model`: the on-disk `{"Dollar": ...}` projection.
pub mod args;
pub mod client;
pub mod model;

use log::info;
use quote_common::{QuoteError, Result};
use reqwest::Client;

use crate::args::Args;
use crate::client::QuoteClient;
use crate::model::quote_file::ClientQuoteFile;

/// One client run: fetch, then write the file.
///
/// The output file is only touched after a bid has been fetched and decoded, so a
/// failed run leaves any previous file exactly as it was.
pub async fn run(args: &Args) -> Result<ClientQuoteFile> {
    let http = Client::builder()
        .build()
        .map_err(|e| QuoteError::Transport(e.to_string()))?;
    run_with(&QuoteClient::new(http, args.url.clone()), args).await
}

/// Like [`run`], with a caller-supplied client.
pub async fn run_with(client: &QuoteClient, args: &Args) -> Result<ClientQuoteFile> {
    let bid = client.fetch_bid().await?;
    let file = ClientQuoteFile::from_bid(bid);
    file.write_to(&args.output).await?;
    info!("Saved Dollar={} to {}", file.dollar, args.output.display());
    Ok(file)
}
