use std::path::Path;

use anyhow::Result;
use dialoguer::Select;

use sumo_ide_core::catalog::StrategyCatalog;
use sumo_ide_core::injector;
use sumo_ide_core::sketch;

use crate::output;

/// Ensure a strategy and its dependencies are present in a sketch.
///
/// If no strategy is given, prompts interactively. Injecting a strategy that is
/// already present leaves the file untouched.
pub async fn run(
    config_path: &Path,
    sketch_path: &Path,
    strategy: Option<&str>,
    output_path: Option<&Path>,
) -> Result<()> {
    output::print_header(&format!("sumo-ide inject: {}", sketch_path.display()));

    let (_, catalog) = super::load_context(config_path)?;
    let text = sketch::open(sketch_path)?;

    let requested = match strategy {
        Some(s) => s.to_string(),
        None => select_strategy(&catalog)?,
    };
    let name = catalog
        .canonical_name(&requested)
        .ok_or_else(|| sumo_ide_core::error::SumoError::UnknownStrategy(requested.clone()))?;

    let injection = injector::ensure_strategy(&text, &catalog, name)?;
    if injection.is_unchanged() {
        output::print_success(&format!("{name} is already present"));
        if output_path.is_none() {
            return Ok(());
        }
    }

    for prototype in &injection.inserted_prototypes {
        output::print_key_value("prototype", prototype);
    }
    for body in &injection.appended_bodies {
        output::print_key_value("body", body);
    }

    let destination = output_path.unwrap_or(sketch_path);
    sketch::save(destination, &injection.document)?;
    output::print_success(&format!("{name} injected into {}", destination.display()));
    Ok(())
}

fn select_strategy(catalog: &StrategyCatalog) -> Result<String> {
    let names: Vec<&str> = catalog.names().collect();
    let selection = Select::new()
        .with_prompt("Select strategy")
        .items(&names)
        .default(0)
        .interact()?;
    Ok(names[selection].to_string())
}
