//! Terminal output formatting for the sumo-ide CLI.
//!
//! Provides consistent, colored output using the [`console`] crate.

use console::style;

use sumo_ide_core::session::Notice;
use sumo_ide_core::store::{ControlKind, VariableDeclaration};

/// Print a bold cyan header with an underline separator.
pub fn print_header(text: &str) {
    println!("\n{}", style(text).bold().cyan());
    println!("{}", style("=".repeat(text.chars().count())).dim());
}

/// Print a success message prefixed with green `[OK]`.
pub fn print_success(text: &str) {
    println!("{} {}", style("[OK]").green().bold(), text);
}

/// Print a warning message prefixed with yellow `[WARN]`.
pub fn print_warning(text: &str) {
    println!("{} {}", style("[WARN]").yellow().bold(), text);
}

/// Print every queued session notice as a warning.
pub fn print_notices(notices: &[Notice]) {
    for notice in notices {
        print_warning(&notice.to_string());
    }
}

/// Print a key-value pair with dimmed key formatting.
pub fn print_key_value(key: &str, value: &str) {
    println!("  {}: {}", style(key).dim(), value);
}

/// Print one control row: name, kind, type and value.
pub fn print_control(decl: &VariableDeclaration, name_width: usize) {
    let kind = match decl.kind {
        ControlKind::Numeric => style("numeric").blue(),
        ControlKind::Toggle => style("toggle").magenta(),
        ControlKind::Strategy => style("strategy").green(),
        ControlKind::Text => style("text").dim(),
    };
    let type_name = if decl.is_const {
        format!("const {}", decl.type_name)
    } else {
        decl.type_name.clone()
    };
    println!(
        "  {:<width$}  {:<8}  {:<14}  {}",
        style(&decl.name).bold(),
        kind,
        style(type_name).dim(),
        decl.value,
        width = name_width
    );
}
