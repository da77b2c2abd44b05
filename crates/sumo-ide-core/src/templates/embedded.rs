//! Compile-time embedded templates and strategy snippets.
//!
//! Each constant loads a file from the workspace `templates/` directory via
//! [`include_str!`]. The paths are relative to this source file
//! (`crates/sumo-ide-core/src/templates/embedded.rs`).
//!
//! ## Adding a new strategy
//!
//! 1. Place the function body under `templates/strategies/`
//! 2. Add a `pub const` here with `include_str!("../../../../templates/strategies/<file>")`
//! 3. Register it in [`crate::catalog::StrategyCatalog::builtin`] with its prototype and
//!    dependency prototypes
//!
//! Do NOT rename or move template files without updating the `include_str!` path here.

// -------------------------------------------------------
// Strategy implementations
// -------------------------------------------------------

pub const SEARCH_AND_DESTROY: &str =
    include_str!("../../../../templates/strategies/search_and_destroy.ino");
pub const AGGRESSIVE_PURSUIT: &str =
    include_str!("../../../../templates/strategies/aggressive_pursuit.ino");
pub const INITIAL_EVADE_AND_SEARCH: &str =
    include_str!("../../../../templates/strategies/initial_evade_and_search.ino");

// -------------------------------------------------------
// Sketch templates
// -------------------------------------------------------

/// Starter sumo robot sketch. Variables: `robot_name`, `search_speed`, `found_speed`,
/// `turn_speed`, `backward_time`, `turn_left_time`, `strategy`.
pub const SUMO_BOT_SKETCH: &str = include_str!("../../../../templates/sketch/sumo_bot.ino.tmpl");
