//! CLI command implementations for sumo-ide.
//!
//! Each module corresponds to a subcommand (`sumo-ide <command>`).

pub mod inject;
pub mod new;
pub mod set;
pub mod strategies;
pub mod vars;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use sumo_ide_core::catalog::StrategyCatalog;
use sumo_ide_core::config::EditorConfig;

/// Load the editor config (defaults if the file is absent) and the strategy catalog.
pub fn load_context(config_path: &Path) -> Result<(EditorConfig, Arc<StrategyCatalog>)> {
    let config = EditorConfig::load_or_default(config_path)?;
    let catalog = match config.catalog_path(config_path) {
        Some(path) => StrategyCatalog::load_with_builtin(&path)?,
        None => StrategyCatalog::builtin(),
    };
    Ok((config, Arc::new(catalog)))
}
