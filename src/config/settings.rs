//! User settings for the ledger
//!
//! Stored as `config.json` in the config directory. Every field has a serde
//! default, so a partial or missing file yields usable settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::LedgerPaths;
use crate::codec::{CsvOperationLayout, Format};
use crate::error::LedgerError;

/// User settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Format used when an export or import command names none
    #[serde(default)]
    pub default_format: Format,

    /// Column order assumed for operation CSV imports
    #[serde(default)]
    pub csv_operation_layout: CsvOperationLayout,

    /// `tracing` filter directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Directory that relative export and import paths are resolved against
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
}

fn default_log_filter() -> String {
    "finance_ledger=info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_format: Format::default(),
            csv_operation_layout: CsvOperationLayout::default(),
            log_filter: default_log_filter(),
            export_dir: None,
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if no file exists
    pub fn load_or_create(paths: &LedgerPaths) -> Result<Self, LedgerError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| LedgerError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| LedgerError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LedgerPaths) -> Result<(), LedgerError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| LedgerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| LedgerError::Io(format!("Failed to write settings file: {}", e)))
    }

    /// Resolve a user-supplied path against `export_dir` when it is relative
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        let path = PathBuf::from(path);
        match &self.export_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path,
        }
    }
}
