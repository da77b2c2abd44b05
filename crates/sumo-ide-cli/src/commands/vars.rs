use std::path::Path;

use anyhow::Result;

use sumo_ide_core::session::EditingSession;
use sumo_ide_core::sketch;

use crate::output;

/// Print the controls extracted from a sketch.
///
/// With `json`, prints the store as JSON instead of a table.
pub async fn run(config_path: &Path, sketch_path: &Path, json: bool) -> Result<()> {
    let (config, catalog) = super::load_context(config_path)?;
    let session = EditingSession::with_document(sketch::open(sketch_path)?, config, catalog);
    let store = session.store();

    if json {
        println!("{}", serde_json::to_string_pretty(store)?);
        return Ok(());
    }

    output::print_header(&format!("sumo-ide vars: {}", sketch_path.display()));

    if store.is_empty() {
        output::print_warning("no global variables found (missing '// Global variables' region?)");
        return Ok(());
    }

    let width = store.names().map(str::len).max().unwrap_or(0);
    for decl in store.iter() {
        output::print_control(decl, width);
    }
    Ok(())
}
