//! End-to-end orchestration: validate, probe, fetch, extract, persist.

use std::path::PathBuf;

use crate::error::{BlogSaverError, Result};
use crate::extract::extract_content;
use crate::fetcher::fetch_webpage;
use crate::store::ContentStore;
use crate::validator::{is_url_accessible, is_valid_url};

/// Sequential blog-post ingestion pipeline.
///
/// Five stages run strictly in order, each a hard gate: validate, probe
/// accessibility, fetch, extract, persist. The first failure aborts the
/// run and propagates; nothing is rolled back (persistence is the only
/// stage with side effects).
pub struct Pipeline {
    client: reqwest::Client,
    store: ContentStore,
}

impl Pipeline {
    /// Create a pipeline persisting under the given repository root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            client: reqwest::Client::new(),
            store: ContentStore::new(root),
        }
    }

    /// Fetch the page at `url`, extract it and persist the result.
    ///
    /// Returns the generated filename as the sole success signal.
    ///
    /// # Errors
    ///
    /// [`BlogSaverError::InvalidInput`] for malformed or non-http(s) URLs
    /// (before any network or filesystem access),
    /// [`BlogSaverError::Unreachable`] when the accessibility probe fails,
    /// fetch errors per [`fetch_webpage`], and I/O errors from persistence.
    /// Extraction itself never fails; it substitutes defaults for missing
    /// fields.
    pub async fn add_blog_post(&self, url: &str) -> Result<String> {
        if !is_valid_url(url) {
            return Err(BlogSaverError::InvalidInput);
        }

        if !is_url_accessible(&self.client, url).await {
            return Err(BlogSaverError::Unreachable);
        }

        tracing::info!("Fetching content from {url}");
        let page = fetch_webpage(&self.client, url).await?;

        let post = extract_content(&page.content, url);

        let saved = self
            .store
            .save_blog_content(&post.plain_text, &post.metadata)
            .await?;
        tracing::info!("Blog post saved to {}", saved.content_path.display());

        Ok(saved.filename)
    }
}
