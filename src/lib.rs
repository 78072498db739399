//! # blog_saver
//!
//! Extracts blog-post content from web pages and persists it, with
//! metadata, into a Git-backed content repository.
//!
//! ## Overview
//!
//! The core is a sequential ingestion pipeline: validate the URL, probe
//! that it is reachable, fetch the raw HTML, flatten it to plain text with
//! a metadata record, and write the content/metadata pair under the
//! repository's `posts/` and `metadata/` directories.
//!
//! Around the pipeline sit thin collaborators: a Git wrapper for
//! initializing the repository and reporting its status, a client for a
//! third-party article generator API, and an on-disk configuration file
//! holding the API key.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use blog_saver::Pipeline;
//!
//! # async fn example() -> blog_saver::Result<()> {
//! let pipeline = Pipeline::new(".");
//! let filename = pipeline.add_blog_post("https://example.com/post").await?;
//! println!("saved as {filename}");
//! # Ok(())
//! # }
//! ```

pub mod articles;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetcher;
pub mod filename;
pub mod pipeline;
pub mod repo;
pub mod store;
pub mod validator;

pub use articles::{Article, ArticleApiClient, fetch_all_articles, fetch_and_save_article};
pub use config::Config;
pub use error::{BlogSaverError, Result};
pub use extract::{ExtractedPost, Metadata, extract_content};
pub use fetcher::{FetchedPage, fetch_webpage};
pub use filename::generate_filename;
pub use pipeline::Pipeline;
pub use repo::{RepoStatus, init_repo, repo_status};
pub use store::{ContentStore, SavedPost};
pub use validator::{is_url_accessible, is_valid_url};
