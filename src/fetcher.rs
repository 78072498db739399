//! Webpage fetching with a browser-like identity and a bounded timeout.

use std::time::Duration;

use reqwest::header::HeaderMap;

use crate::error::{BlogSaverError, Result};
use crate::validator::is_valid_url;

/// User-agent presented to remote servers. Some blogs refuse obviously
/// non-browser clients, so we identify as a desktop Chrome.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Timeout for a full page fetch.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// A fetched webpage: the raw body plus response metadata.
#[derive(Debug)]
pub struct FetchedPage {
    /// Raw response body as text.
    pub content: String,
    /// HTTP status code of the final response.
    pub status: u16,
    /// Response headers.
    pub headers: HeaderMap,
    /// Final URL after any redirects.
    pub url: String,
}

/// Fetch the raw HTML of `url`.
///
/// The URL must pass [`is_valid_url`]; otherwise this fails with
/// [`BlogSaverError::InvalidInput`] before any network I/O. Fetch failures
/// split by whether a response was received: an error status becomes
/// [`BlogSaverError::HttpStatus`], a timeout or connection failure becomes
/// [`BlogSaverError::NoResponse`], and anything else
/// [`BlogSaverError::Request`]. Nothing is retried.
pub async fn fetch_webpage(client: &reqwest::Client, url: &str) -> Result<FetchedPage> {
    if !is_valid_url(url) {
        return Err(BlogSaverError::InvalidInput);
    }

    let response = client
        .get(url)
        .header(reqwest::header::USER_AGENT, USER_AGENT)
        .timeout(FETCH_TIMEOUT)
        .send()
        .await
        .map_err(classify_send_error)?;

    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        return Err(BlogSaverError::HttpStatus(status.as_u16()));
    }

    let headers = response.headers().clone();
    let final_url = response.url().to_string();
    let content = response
        .text()
        .await
        .map_err(|e| BlogSaverError::Request(e.to_string()))?;

    tracing::debug!("Fetched {} bytes from {final_url}", content.len());

    Ok(FetchedPage {
        content,
        status: status.as_u16(),
        headers,
        url: final_url,
    })
}

fn classify_send_error(e: reqwest::Error) -> BlogSaverError {
    if let Some(status) = e.status() {
        BlogSaverError::HttpStatus(status.as_u16())
    } else if e.is_timeout() || e.is_connect() {
        BlogSaverError::NoResponse
    } else if e.is_builder() || e.is_request() {
        BlogSaverError::Request(e.to_string())
    } else {
        BlogSaverError::NoResponse
    }
}
