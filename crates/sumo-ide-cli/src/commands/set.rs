use std::path::Path;
use std::time::Instant;

use anyhow::Result;

use sumo_ide_core::session::EditingSession;
use sumo_ide_core::sketch;

use crate::output;

/// Apply `NAME=VALUE` assignments to a sketch.
///
/// All assignments go through one editing session as a single burst: strategy
/// selections are injected immediately, and the value rewrite runs once after the
/// configured debounce window.
pub async fn run(
    config_path: &Path,
    sketch_path: &Path,
    assignments: &[(String, String)],
    output_path: Option<&Path>,
) -> Result<()> {
    output::print_header(&format!("sumo-ide set: {}", sketch_path.display()));

    let (config, catalog) = super::load_context(config_path)?;
    let window = config.debounce_window();
    let mut session = EditingSession::with_document(sketch::open(sketch_path)?, config, catalog);

    let mut failed = 0;
    for (name, value) in assignments {
        match session.set_value(name, value, Instant::now()) {
            Ok(()) => output::print_key_value(name, value),
            Err(e) => {
                output::print_warning(&e.to_string());
                failed += 1;
            }
        }
    }

    if session.is_pending() {
        tracing::debug!(window_ms = window.as_millis() as u64, "waiting for debounce window");
        tokio::time::sleep(window).await;
        if !session.poll(Instant::now()) {
            session.flush();
        }
    }
    output::print_notices(&session.take_notices());

    let destination = output_path.unwrap_or(sketch_path);
    sketch::save(destination, session.document())?;

    let applied = assignments.len() - failed;
    output::print_success(&format!(
        "{applied} of {} value(s) written to {}",
        assignments.len(),
        destination.display()
    ));
    if failed > 0 {
        anyhow::bail!("{failed} assignment(s) rejected");
    }
    Ok(())
}
