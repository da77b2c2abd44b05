use std::path::{Path, PathBuf};

use anyhow::Result;

use sumo_ide_core::sketch::{self, SketchParams};

use crate::output;

/// Scaffold a starter sketch.
///
/// Renders the embedded sumo robot template with `name` in its header, injects the
/// chosen strategy, and writes it to `path` (or the configured output file).
/// Refuses to overwrite an existing file.
pub async fn run(
    config_path: &Path,
    path: Option<&Path>,
    name: &str,
    strategy: &str,
) -> Result<()> {
    let (config, catalog) = super::load_context(config_path)?;
    let path = path.map_or_else(|| PathBuf::from(&config.output_file), Path::to_path_buf);
    let path = path.as_path();
    output::print_header(&format!("sumo-ide new: {}", path.display()));

    let params = SketchParams::new(name, strategy);
    let text = sketch::create(path, &catalog, &params)?;

    let store = sumo_ide_core::extractor::extract(&text);
    output::print_key_value("Robot", name);
    output::print_key_value("Controls", &store.len().to_string());
    output::print_success(&format!("Sketch written to {}", path.display()));
    println!();
    println!("  Next steps:");
    println!("    sumo-ide vars {}", path.display());
    println!("    sumo-ide set {} SEARCH_SPEED=120", path.display());
    println!();

    Ok(())
}
