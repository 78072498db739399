//! Durable persistence of the content/metadata file pair.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::extract::Metadata;
use crate::filename::{CONTENT_EXT, generate_filename};

/// Directory holding plain-text post content, relative to the root.
pub const POSTS_DIR: &str = "posts";
/// Directory holding per-post metadata records, relative to the root.
pub const METADATA_DIR: &str = "metadata";

/// Paths produced by a successful save.
#[derive(Debug)]
pub struct SavedPost {
    /// Generated content filename (with the `.txt` extension).
    pub filename: String,
    /// Full path of the written content file.
    pub content_path: PathBuf,
    /// Full path of the written metadata file.
    pub metadata_path: PathBuf,
}

/// Writes post content and metadata as a matched pair of files under a
/// repository root.
///
/// Content goes to `posts/<name>.txt`, metadata to `metadata/<name>.json`,
/// linked by the shared stem. Both files are staged under temporary names
/// and renamed into place only after both writes succeed, so a failure
/// never leaves half a pair behind.
pub struct ContentStore {
    root: PathBuf,
}

impl ContentStore {
    /// Create a store rooted at the given repository directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The repository root this store writes under.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persist `content` and `metadata` as a linked pair, returning the
    /// generated filename and both written paths.
    ///
    /// The filename is derived from the metadata's URL and title via
    /// [`generate_filename`]. The `posts/` and `metadata/` directories are
    /// created as needed; creation is idempotent.
    pub async fn save_blog_content(
        &self,
        content: &str,
        metadata: &Metadata,
    ) -> Result<SavedPost> {
        let posts_dir = self.root.join(POSTS_DIR);
        let metadata_dir = self.root.join(METADATA_DIR);
        tokio::fs::create_dir_all(&posts_dir).await?;
        tokio::fs::create_dir_all(&metadata_dir).await?;

        let filename = generate_filename(&metadata.url, &metadata.title);
        let stem = filename
            .strip_suffix(&format!(".{CONTENT_EXT}"))
            .unwrap_or(&filename);
        let content_path = posts_dir.join(&filename);
        let metadata_path = metadata_dir.join(format!("{stem}.json"));

        let record = serde_json::to_string_pretty(metadata)?;

        let content_tmp = posts_dir.join(format!(".{filename}.tmp"));
        let metadata_tmp = metadata_dir.join(format!(".{stem}.json.tmp"));

        if let Err(e) = stage_pair(&content_tmp, content, &metadata_tmp, &record).await {
            let _ = tokio::fs::remove_file(&content_tmp).await;
            let _ = tokio::fs::remove_file(&metadata_tmp).await;
            return Err(e);
        }

        tokio::fs::rename(&content_tmp, &content_path).await?;
        tokio::fs::rename(&metadata_tmp, &metadata_path).await?;

        tracing::debug!(
            "Wrote {} bytes to {}",
            content.len(),
            content_path.display()
        );

        Ok(SavedPost {
            filename,
            content_path,
            metadata_path,
        })
    }
}

/// Write both temporaries; the caller cleans up on failure.
async fn stage_pair(
    content_tmp: &Path,
    content: &str,
    metadata_tmp: &Path,
    record: &str,
) -> Result<()> {
    tokio::fs::write(content_tmp, content).await?;
    tokio::fs::write(metadata_tmp, record).await?;
    Ok(())
}
