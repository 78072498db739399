//! On-disk configuration: the article generator API key.
//!
//! Loaded once at startup and passed explicitly to the components that need
//! it; there is no process-wide configuration singleton.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Name of the configuration file under the repository root.
pub const CONFIG_FILE: &str = ".config.json";

/// Persisted configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// API key for the article generator service.
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Config {
    /// Load the configuration from `<root>/.config.json`.
    ///
    /// A missing file yields the default (no key); a malformed file is an
    /// error.
    pub async fn load(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE);
        match tokio::fs::read_to_string(&path).await {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Write the configuration to `<root>/.config.json`, pretty-printed.
    pub async fn save(&self, root: &Path) -> Result<()> {
        let path = root.join(CONFIG_FILE);
        let raw = serde_json::to_string_pretty(self)?;
        tokio::fs::write(&path, raw).await?;
        Ok(())
    }
}
