//! Unified error types for the sumo-ide toolkit.

use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur during sumo-ide operations.
///
/// The text engine itself (extract, rewrite) never fails: region and anchor misses are
/// reported inside its outcomes. The variants below exist for callers that must react.
#[derive(Error, Debug)]
pub enum SumoError {
    // --- Configuration ---

    /// The configuration file (`sumo-ide.config.json`) was not found.
    #[error("config file not found at {path}")]
    ConfigNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file exists but contains invalid JSON.
    #[error("failed to parse config at {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A strategy catalog file named in the config could not be read.
    #[error("strategy catalog not found at {path}")]
    CatalogNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A strategy catalog file could not be parsed.
    #[error("failed to parse strategy catalog at {path}")]
    CatalogParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // --- Document structure ---

    /// A region marker comment is missing, duplicated, or out of order.
    #[error("region marker '{marker}' not found (or not unique) in sketch")]
    RegionMissing { marker: &'static str },

    /// The `name = value` anchor of a declaration is no longer present in the sketch.
    #[error("anchor for '{name}' not found in the global variables region")]
    AnchorMiss { name: String },

    // --- Strategies ---

    /// The requested strategy is not in the catalog.
    #[error("unknown strategy: {0}")]
    UnknownStrategy(String),

    // --- Variables ---

    /// The variable is not a declaration of the current sketch.
    #[error("unknown variable: {0}")]
    UnknownVariable(String),

    /// The value does not fit the control bound to the variable.
    #[error("invalid value '{value}' for {name} (expected {expected})")]
    InvalidValue {
        name: String,
        value: String,
        expected: &'static str,
    },

    // --- Sketch files ---

    /// Reading a sketch from disk failed.
    #[error("failed to read sketch at {path}")]
    SketchRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing a sketch to disk failed.
    #[error("failed to write sketch to {path}")]
    SketchWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Attempted to scaffold a sketch over an existing file.
    #[error("sketch already exists: {0}")]
    SketchExists(PathBuf),

    // --- Templates ---

    /// Handlebars template rendering failed (invalid template or missing variables).
    #[error("template rendering failed: {0}")]
    TemplateRender(String),

    // --- General ---

    /// A filesystem I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A catch-all for errors from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Alias for `Result<T, SumoError>`.
pub type Result<T> = std::result::Result<T, SumoError>;
