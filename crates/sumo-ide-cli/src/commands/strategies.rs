use std::path::Path;

use anyhow::Result;
use console::style;

use crate::output;

/// List the strategies of the catalog with their prototypes and dependencies.
pub async fn run(config_path: &Path) -> Result<()> {
    output::print_header("sumo-ide strategies");

    let (_, catalog) = super::load_context(config_path)?;
    for def in catalog.iter() {
        println!("\n{}", style(&def.name).bold().green());
        output::print_key_value("prototype", &def.prototype);
        if def.dependencies.is_empty() {
            output::print_key_value("depends on", "-");
        }
        for dependency in &def.dependencies {
            output::print_key_value("depends on", dependency);
        }
    }
    println!();
    Ok(())
}
