//! Error types for the `blog_saver` crate.

/// All errors that can occur while extracting and persisting blog posts.
#[derive(Debug, thiserror::Error)]
pub enum BlogSaverError {
    /// The supplied URL is not an absolute http/https URL.
    #[error("Invalid URL format. Please provide a valid HTTP or HTTPS URL.")]
    InvalidInput,

    /// The accessibility probe failed; the resource cannot be reached.
    #[error("The URL is not accessible. Please check the URL and try again.")]
    Unreachable,

    /// The remote responded with an error status.
    #[error("Failed to fetch webpage: HTTP status {0}")]
    HttpStatus(u16),

    /// The request was sent but no response arrived (network error or timeout).
    #[error("Failed to fetch webpage: No response received")]
    NoResponse,

    /// The request could not be constructed or sent.
    #[error("Failed to fetch webpage: {0}")]
    Request(String),

    /// An article API operation was attempted without a configured key.
    #[error("API key not set. Please set your API key first.")]
    MissingCredential,

    /// The article API failed or returned an unexpected response shape.
    #[error("Article API error: {0}")]
    Api(String),

    /// A git invocation failed.
    #[error("Git error: {0}")]
    Git(String),

    /// A filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Metadata or configuration (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A type alias for `Result<T, BlogSaverError>`.
pub type Result<T> = std::result::Result<T, BlogSaverError>;
