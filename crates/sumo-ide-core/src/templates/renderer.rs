//! Handlebars-based template renderer for sketch scaffolding.
//!
//! Wraps the [`handlebars::Handlebars`] engine with **strict mode** enabled, so any
//! `{{variable}}` referenced in a template must be present in the data context.
//! Sketch templates produce source that is later parsed by the extractor; a value
//! rendered as empty would silently drop a declaration from the globals region.
//!
//! ## Usage
//!
//! ```ignore
//! use crate::templates::{embedded, renderer::TemplateRenderer};
//!
//! let renderer = TemplateRenderer::new();
//! let data = serde_json::json!({ "robot_name": "Bulldozer", "strategy": "SearchAndDestroy" });
//! let output = renderer.render(embedded::SUMO_BOT_SKETCH, &data)?;
//! ```

use handlebars::Handlebars;
use serde_json::Value;

use crate::error::{Result, SumoError};

/// Template renderer using Handlebars for generating sketches.
pub struct TemplateRenderer {
    hbs: Handlebars<'static>,
}

impl TemplateRenderer {
    /// Create a new renderer with strict mode enabled and HTML escaping disabled
    /// (sketches contain quotes and `<`/`>` that must survive verbatim).
    pub fn new() -> Self {
        let mut hbs = Handlebars::new();
        hbs.set_strict_mode(true);
        hbs.register_escape_fn(handlebars::no_escape);
        Self { hbs }
    }

    /// Render a template string with the given data context.
    pub fn render(&self, template: &str, data: &Value) -> Result<String> {
        self.hbs
            .render_template(template, data)
            .map_err(|e| SumoError::TemplateRender(e.to_string()))
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}
