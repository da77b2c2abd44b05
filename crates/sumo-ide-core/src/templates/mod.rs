//! Templates for sketch scaffolding and the built-in strategy snippets.
//!
//! Templates are embedded into the binary at compile-time via [`include_str!`] in the
//! [`embedded`] module. Sketch templates are rendered at runtime with
//! [Handlebars](https://handlebarsjs.com/) via the [`renderer::TemplateRenderer`];
//! strategy snippets are plain text and are used verbatim by the catalog.
//!
//! ## Template variables
//!
//! The starter sketch uses:
//! - `{{robot_name}}`: shown in the header comment
//! - `{{search_speed}}`, `{{found_speed}}`, `{{turn_speed}}`: initial motor speeds
//! - `{{backward_time}}`, `{{turn_left_time}}`: evade timings in ms
//! - `{{strategy}}`: strategy called from `loop()`
//!
//! **Warning**: Template files in `templates/` and constants in [`embedded`] must stay in sync.
//! The `include_str!` paths are relative to this file and checked at compile-time.

pub mod embedded;
pub mod renderer;
