//! Sketch file I/O and scaffolding.
//!
//! Opening hands the raw text to the extractor; saving writes the current document
//! verbatim. Failures are reported as [`SumoError::SketchRead`] or
//! [`SumoError::SketchWrite`] and leave any in-memory state alone.

use std::path::Path;

use serde::Serialize;

use crate::catalog::StrategyCatalog;
use crate::error::{Result, SumoError};
use crate::injector;
use crate::templates::embedded;
use crate::templates::renderer::TemplateRenderer;

/// Read a sketch from disk.
pub fn open(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| SumoError::SketchRead {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write a sketch to disk, creating parent directories as needed.
pub fn save(path: &Path, text: &str) -> Result<()> {
    let write = || -> std::io::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, text)
    };
    write().map_err(|e| SumoError::SketchWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "sketch saved");
    Ok(())
}

/// Values for the starter sketch template.
#[derive(Debug, Clone, Serialize)]
pub struct SketchParams {
    pub robot_name: String,
    pub search_speed: u32,
    pub found_speed: u32,
    pub turn_speed: u32,
    pub backward_time: u32,
    pub turn_left_time: u32,
    /// Canonical catalog name of the strategy called from `loop()`.
    pub strategy: String,
}

impl SketchParams {
    pub fn new(robot_name: &str, strategy: &str) -> Self {
        Self {
            robot_name: robot_name.to_string(),
            search_speed: 100,
            found_speed: 255,
            turn_speed: 150,
            backward_time: 400,
            turn_left_time: 300,
            strategy: strategy.to_string(),
        }
    }
}

/// Render the starter sketch and inject its strategy.
pub fn render_starter(catalog: &StrategyCatalog, params: &SketchParams) -> Result<String> {
    // resolve before rendering so loop() calls the canonical name
    let strategy = catalog
        .canonical_name(&params.strategy)
        .ok_or_else(|| SumoError::UnknownStrategy(params.strategy.clone()))?;
    let params = SketchParams {
        strategy: strategy.to_string(),
        ..params.clone()
    };

    let data = serde_json::to_value(&params).map_err(anyhow::Error::from)?;
    let text = TemplateRenderer::new().render(embedded::SUMO_BOT_SKETCH, &data)?;
    Ok(injector::ensure_strategy(&text, catalog, strategy)?.document)
}

/// Scaffold a new sketch at `path`. Refuses to overwrite an existing file.
pub fn create(path: &Path, catalog: &StrategyCatalog, params: &SketchParams) -> Result<String> {
    if path.exists() {
        return Err(SumoError::SketchExists(path.to_path_buf()));
    }
    let text = render_starter(catalog, params)?;
    save(path, &text)?;
    Ok(text)
}
