//! Repository initialization and status, wrapping the `git` binary.

use std::path::Path;

use tokio::process::Command;

use crate::error::{BlogSaverError, Result};
use crate::store::{METADATA_DIR, POSTS_DIR};

const README: &str = "\
# Blog Repository

A collection of blog posts saved from the web.

## Structure

- `posts/`: extracted blog posts in plain text format
- `metadata/`: metadata about each blog post

## Adding new blog posts

```
blog-saver add https://example.com/blog-post
```
";

const GITIGNORE: &str = "\
# Local configuration (holds the API key)
.config.json

# Editor files
.vscode/
.idea/
*.swp

# OS files
.DS_Store
Thumbs.db
";

/// Current branch plus working-tree file lists, as reported by git.
#[derive(Debug, Clone, Default)]
pub struct RepoStatus {
    pub branch: String,
    pub staged: Vec<String>,
    pub modified: Vec<String>,
    pub untracked: Vec<String>,
}

impl RepoStatus {
    /// Placeholder shape used for display when git cannot be queried.
    pub fn unknown() -> Self {
        Self {
            branch: "unknown".to_string(),
            ..Self::default()
        }
    }
}

/// Initialize the content repository at `root`.
///
/// Idempotent: when `.git` already exists this is a no-op returning
/// `false`. Otherwise runs `git init` and seeds `README.md`, `.gitignore`
/// and the `posts/` and `metadata/` directories, each only if absent.
pub async fn init_repo(root: &Path) -> Result<bool> {
    if root.join(".git").exists() {
        tracing::info!("Git repository already initialized");
        return Ok(false);
    }

    run_git(root, &["init"]).await?;
    tracing::info!("Git repository initialized at {}", root.display());

    let readme = root.join("README.md");
    if !readme.exists() {
        tokio::fs::write(&readme, README).await?;
    }

    let gitignore = root.join(".gitignore");
    if !gitignore.exists() {
        tokio::fs::write(&gitignore, GITIGNORE).await?;
    }

    tokio::fs::create_dir_all(root.join(POSTS_DIR)).await?;
    tokio::fs::create_dir_all(root.join(METADATA_DIR)).await?;

    Ok(true)
}

/// Query the repository status via `git status --porcelain=v1 -b`.
pub async fn repo_status(root: &Path) -> Result<RepoStatus> {
    let output = run_git(root, &["status", "--porcelain=v1", "-b"]).await?;
    Ok(parse_status(&output))
}

async fn run_git(root: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(root)
        .output()
        .await
        .map_err(|e| BlogSaverError::Git(format!("failed to run git: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(BlogSaverError::Git(stderr.trim().to_string()));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Parse porcelain v1 branch-header output into a [`RepoStatus`].
///
/// A path appears in `staged` when its index column is set and in
/// `modified` when its worktree column is set; `??` entries are untracked.
fn parse_status(porcelain: &str) -> RepoStatus {
    let mut status = RepoStatus::default();

    for line in porcelain.lines() {
        if let Some(branch) = line.strip_prefix("## ") {
            status.branch = branch
                .split("...")
                .next()
                .unwrap_or(branch)
                .trim()
                .to_string();
        } else if let Some(path) = line.strip_prefix("?? ") {
            status.untracked.push(path.to_string());
        } else if line.len() > 3 {
            let (codes, path) = line.split_at(3);
            let mut columns = codes.chars();
            let index = columns.next().unwrap_or(' ');
            let worktree = columns.next().unwrap_or(' ');
            if index != ' ' {
                status.staged.push(path.to_string());
            }
            if worktree != ' ' {
                status.modified.push(path.to_string());
            }
        }
    }

    status
}
