//! Decision archive configuration from TOML (`[archive]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw archive configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileArchiveConfig {
    /// Persist rounds and recall them in later ones
    pub enabled: bool,
    /// JSONL file; defaults to the user data directory
    pub path: Option<PathBuf>,
}

impl Default for FileArchiveConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: None,
        }
    }
}

impl FileArchiveConfig {
    /// Configured path, or `$XDG_DATA_HOME/council/decisions.jsonl`
    pub fn resolved_path(&self) -> Option<PathBuf> {
        self.path
            .clone()
            .or_else(|| dirs::data_dir().map(|d| d.join("council").join("decisions.jsonl")))
    }
}
