//! Client for the third-party article generator HTTP API.
//!
//! Transport and unexpected-shape failures surface as real errors; there is
//! no silent substitution of placeholder data. Callers decide whether and
//! how to degrade.

use chrono::{Local, Utc};
use serde::Deserialize;

use crate::config::Config;
use crate::error::{BlogSaverError, Result};
use crate::extract::Metadata;
use crate::store::ContentStore;

/// Default base URL of the article generator service.
const DEFAULT_BASE_URL: &str = "https://articleaigenerator.com/api";

/// Display name of the article source, used in formatted output.
const ARTICLE_SOURCE: &str = "Article AI Generator";

/// An article as returned by the generator API.
///
/// The service's schema is loosely specified; every field apart from `id`
/// is optional and defaulted on use.
#[derive(Debug, Clone, Deserialize)]
pub struct Article {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, rename = "createdAt")]
    pub created_at: Option<String>,
}

/// The list endpoint returns either a bare array or `{"articles": [...]}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ArticleListResponse {
    Bare(Vec<Article>),
    Wrapped { articles: Vec<Article> },
}

/// Authenticated client for the article generator API.
#[derive(Debug)]
pub struct ArticleApiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl ArticleApiClient {
    /// Create a client with the given key against the default service URL.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Create a client from loaded configuration.
    ///
    /// Fails with [`BlogSaverError::MissingCredential`] when no key is
    /// configured, before any request is made.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or(BlogSaverError::MissingCredential)?;
        Ok(Self::new(api_key))
    }

    /// Override the service base URL (primarily for tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// The base URL requests are issued against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List the articles available to this key.
    pub async fn list_articles(&self) -> Result<Vec<Article>> {
        let url = format!("{}/articles", self.base_url);
        let response = self.request(&url).await?;
        let list: ArticleListResponse = response
            .json()
            .await
            .map_err(|e| BlogSaverError::Api(format!("unexpected response shape: {e}")))?;
        Ok(match list {
            ArticleListResponse::Bare(articles) => articles,
            ArticleListResponse::Wrapped { articles } => articles,
        })
    }

    /// Fetch a single article by id.
    pub async fn fetch_article(&self, article_id: &str) -> Result<Article> {
        let url = format!("{}/articles/{}", self.base_url, article_id);
        let response = self.request(&url).await?;
        response
            .json()
            .await
            .map_err(|e| BlogSaverError::Api(format!("unexpected response shape: {e}")))
    }

    async fn request(&self, url: &str) -> Result<reqwest::Response> {
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| BlogSaverError::Api(e.to_string()))?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(BlogSaverError::Api(format!(
                "HTTP status {}",
                status.as_u16()
            )));
        }
        Ok(response)
    }
}

/// Fetch one article and persist it through `store`.
///
/// Returns the generated filename.
pub async fn fetch_and_save_article(
    client: &ArticleApiClient,
    store: &ContentStore,
    article_id: &str,
) -> Result<String> {
    let article = client.fetch_article(article_id).await?;
    let content = format_article(&article);

    let metadata = Metadata {
        title: article
            .title
            .clone()
            .unwrap_or_else(|| "Untitled Article".to_string()),
        url: format!("{}/articles/{}", client.base_url(), article.id),
        date: Utc::now(),
        description: format!("Generated by {ARTICLE_SOURCE}"),
        author: String::new(),
    };

    let saved = store.save_blog_content(&content, &metadata).await?;
    Ok(saved.filename)
}

/// Fetch every listed article sequentially, continuing past individual
/// failures. Returns the number of articles saved.
pub async fn fetch_all_articles(
    client: &ArticleApiClient,
    store: &ContentStore,
) -> Result<usize> {
    let articles = client.list_articles().await?;
    let mut count = 0;

    for article in &articles {
        match fetch_and_save_article(client, store, &article.id).await {
            Ok(filename) => {
                tracing::info!("Saved article {} as {filename}", article.id);
                count += 1;
            }
            Err(e) => {
                tracing::error!("Failed to fetch article {}: {e}", article.id);
            }
        }
    }

    Ok(count)
}

/// Render an article into the stored plain-text template.
fn format_article(article: &Article) -> String {
    let title = article.title.as_deref().unwrap_or("Untitled Article");
    let created = article
        .created_at
        .clone()
        .unwrap_or_else(|| Local::now().format("%Y-%m-%d %H:%M:%S").to_string());
    let body = article.content.as_deref().unwrap_or("");

    format!(
        "# {title}\n\nSource: {ARTICLE_SOURCE}\nID: {}\nCreated: {created}\n\n{body}\n",
        article.id
    )
}
