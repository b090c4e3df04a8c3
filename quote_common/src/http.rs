//! Deadline-bounded HTTP GET shared by the fetcher and the client.
use log::debug;
use reqwest::Client;

use crate::deadline::Deadline;
use crate::error::QuoteError;
use crate::result::Result;

/// GET `url` and return the raw body, with connect, headers and body read all inside
/// `deadline`. Non-success statuses are failures; the body is not inspected.
pub async fn get_body(client: &Client, url: &str, deadline: &Deadline) -> Result<Vec<u8>> {
    let outcome = deadline
        .run(async {
            let response = client
                .get(url)
                .send()
                .await
                .map_err(|e| map_reqwest_error(e, deadline))?;

            let status = response.status();
            if !status.is_success() {
                return Err(QuoteError::UnexpectedStatus(status.as_u16()));
            }

            let body = response
                .bytes()
                .await
                .map_err(|e| map_reqwest_error(e, deadline))?;
            Ok::<_, QuoteError>(body.to_vec())
        })
        .await;
    deadline.report();

    let body = outcome?;
    debug!(
        "{}: GET {} -> {} bytes in {}ms",
        deadline.stage(),
        url,
        body.len(),
        deadline.elapsed().as_millis()
    );
    Ok(body)
}

/// Classify a `reqwest` failure into the shared taxonomy.
pub fn map_reqwest_error(err: reqwest::Error, deadline: &Deadline) -> QuoteError {
    if err.is_timeout() {
        deadline.timeout_error()
    } else if err.is_decode() {
        QuoteError::Decode(err.to_string())
    } else {
        QuoteError::Transport(err.to_string())
    }
}
