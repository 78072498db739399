//! URL validation and the lightweight accessibility probe.

use std::time::Duration;

use url::Url;

/// Timeout for the accessibility probe.
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Returns `true` if `candidate` parses as an absolute URL whose scheme is
/// `http` or `https`.
///
/// Any parse failure or other scheme is simply `false`; this never panics.
/// Validity is independent of reachability -- see [`is_url_accessible`].
///
/// # Example
///
/// ```
/// use blog_saver::is_valid_url;
///
/// assert!(is_valid_url("https://example.com/post"));
/// assert!(!is_valid_url("ftp://example.com"));
/// assert!(!is_valid_url("not-a-url"));
/// ```
pub fn is_valid_url(candidate: &str) -> bool {
    match Url::parse(candidate) {
        Ok(url) => matches!(url.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

/// Probe whether `url` is reachable without downloading its body.
///
/// Issues a HEAD request with a short timeout and reports `true` only when
/// the remote answers with a status below 400. Network errors, timeouts and
/// 4xx/5xx responses all come back as `false`; this never errors.
pub async fn is_url_accessible(client: &reqwest::Client, url: &str) -> bool {
    let response = client.head(url).timeout(PROBE_TIMEOUT).send().await;

    match response {
        Ok(resp) => resp.status().as_u16() < 400,
        Err(e) => {
            tracing::debug!("Accessibility probe failed for {url}: {e}");
            false
        }
    }
}
