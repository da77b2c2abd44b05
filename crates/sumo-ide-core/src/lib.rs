//! Core library for the sumo-ide toolkit.
//!
//! Keeps the structured controls of a sumo robot editor (speed fields, toggles, a
//! strategy selector) in sync with the declarations of an Arduino-style sketch:
//! - [`extractor`] reads the `// Global variables` region into a [`store::VariableStore`]
//! - [`rewriter`] writes changed values back with anchored substitutions
//! - [`injector`] adds strategy snippets from the [`catalog`] exactly once, dependencies first
//! - [`session`] composes the three around one document, with a debounced rewrite
//!
//! The engine matches lines against the rules in [`grammar`]; it does not parse the
//! sketch language. File I/O and scaffolding live in [`sketch`].

pub mod catalog;
pub mod config;
pub mod debounce;
pub mod document;
pub mod error;
pub mod extractor;
pub mod grammar;
pub mod injector;
pub mod rewriter;
pub mod session;
pub mod sketch;
pub mod store;
pub mod templates;
