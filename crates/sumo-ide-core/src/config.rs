//! Editor configuration (`sumo-ide.config.json`).

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SumoError};

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "sumo-ide.config.json";

/// Settings shared by every editing session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Quiescence window before a burst of value changes is written back.
    pub debounce_ms: u64,
    /// Declarations that select a strategy rather than hold a plain value.
    pub strategy_variables: Vec<String>,
    /// File name used when saving a sketch without an explicit destination.
    pub output_file: String,
    /// Optional JSON file with extra strategy definitions.
    pub catalog: Option<PathBuf>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            strategy_variables: vec!["STRATEGY".into()],
            output_file: "file.ino".into(),
            catalog: None,
        }
    }
}

impl EditorConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| SumoError::ConfigNotFound {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&contents).map_err(|e| SumoError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Load `path`, or fall back to defaults when it does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| SumoError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn is_strategy_variable(&self, name: &str) -> bool {
        self.strategy_variables.iter().any(|v| v == name)
    }

    /// Resolve the catalog path relative to the directory holding the config file.
    pub fn catalog_path(&self, config_path: &Path) -> Option<PathBuf> {
        let catalog = self.catalog.as_ref()?;
        if catalog.is_absolute() {
            return Some(catalog.clone());
        }
        let base = config_path.parent().unwrap_or(Path::new("."));
        Some(base.join(catalog))
    }
}
