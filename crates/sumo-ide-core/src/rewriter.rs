//! Write live store values back into a sketch.
//!
//! Each dirty declaration becomes one anchored substitution (see [`grammar::anchor`])
//! over the globals region only. A declaration whose anchor is gone is skipped and
//! reported; the rest still apply.

use crate::document::Layout;
use crate::error::SumoError;
use crate::grammar;
use crate::store::VariableStore;

/// Result of one [`rewrite`] pass.
#[derive(Debug)]
pub struct RewriteOutcome {
    /// The updated document. Equal to the input when nothing applied.
    pub document: String,
    /// Names whose new value is now in the document.
    pub applied: Vec<String>,
    /// Substitutions that were skipped, as [`SumoError::AnchorMiss`] or
    /// [`SumoError::RegionMissing`].
    pub misses: Vec<SumoError>,
}

impl RewriteOutcome {
    pub fn is_clean(&self) -> bool {
        self.misses.is_empty()
    }
}

/// Substitute every dirty declaration's `value` for its `original_value`.
///
/// Declarations whose value equals the anchor are not touched, so running the same
/// store twice changes nothing the second time.
pub fn rewrite(text: &str, store: &VariableStore) -> RewriteOutcome {
    let mut outcome = RewriteOutcome {
        document: text.to_string(),
        applied: Vec::new(),
        misses: Vec::new(),
    };

    if store.dirty().next().is_none() {
        return outcome;
    }

    let layout = match Layout::locate(text) {
        Ok(layout) => layout,
        Err(e) => {
            tracing::warn!("rewrite skipped: {e}");
            outcome.misses.push(e);
            return outcome;
        }
    };

    let mut region = text[layout.globals.clone()].to_string();
    for decl in store.dirty() {
        let rule = match grammar::anchor(&decl.name, &decl.original_value) {
            Ok(rule) => rule,
            Err(e) => {
                tracing::warn!(name = %decl.name, "invalid anchor: {e}");
                outcome.misses.push(SumoError::AnchorMiss {
                    name: decl.name.clone(),
                });
                continue;
            }
        };

        if !rule.is_match(&region) {
            tracing::warn!(name = %decl.name, anchor = %decl.original_value, "anchor not found");
            outcome.misses.push(SumoError::AnchorMiss {
                name: decl.name.clone(),
            });
            continue;
        }

        region = rule
            .replace_all(&region, |caps: &regex::Captures<'_>| {
                format!("{}{}{}", &caps["prefix"], decl.value, &caps["suffix"])
            })
            .into_owned();
        tracing::debug!(name = %decl.name, from = %decl.original_value, to = %decl.value, "substituted");
        outcome.applied.push(decl.name.clone());
    }

    let mut document = String::with_capacity(text.len() + region.len());
    document.push_str(&text[..layout.globals.start]);
    document.push_str(&region);
    document.push_str(&text[layout.globals.end..]);
    outcome.document = document;

    tracing::info!(
        applied = outcome.applied.len(),
        skipped = outcome.misses.len(),
        "rewrite complete"
    );
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::extract;

    const SKETCH: &str = "\
#define SEARCH_SPEED_PIN 3
// Global variables
int SEARCH_SPEED = 100;
int FOUND_SPEED = 100;
int TURN_SPEED = 80; // degrees/s
// Function prototypes
void moveForward(int speed);

void loop() {
    int SEARCH_SPEED = 100;
}
";

    #[test]
    fn test_rewrite_example_scenario() {
        let doc = "// Global variables\nint SEARCH_SPEED = 100;\n// Function prototypes\n";
        let mut store = extract(doc);
        store.set_value("SEARCH_SPEED", "150").unwrap();

        let outcome = rewrite(doc, &store);
        assert_eq!(
            outcome.document,
            "// Global variables\nint SEARCH_SPEED = 150;\n// Function prototypes\n"
        );
        assert_eq!(outcome.applied, vec!["SEARCH_SPEED"]);
        assert!(outcome.is_clean());

        let reextracted = extract(&outcome.document);
        assert_eq!(reextracted.get("SEARCH_SPEED").unwrap().value, "150");
    }

    #[test]
    fn test_rewrite_targets_only_the_named_binding() {
        let mut store = extract(SKETCH);
        store.set_value("SEARCH_SPEED", "150").unwrap();

        let outcome = rewrite(SKETCH, &store);
        assert!(outcome.document.contains("int SEARCH_SPEED = 150;\n"));
        assert!(outcome.document.contains("int FOUND_SPEED = 100;\n"));
        // the local in loop() lies outside the globals region
        assert!(outcome.document.contains("    int SEARCH_SPEED = 100;\n"));
        assert!(outcome.document.contains("int TURN_SPEED = 80; // degrees/s\n"));
    }

    #[test]
    fn test_rewrite_is_idempotent() {
        let mut store = extract(SKETCH);
        store.set_value("SEARCH_SPEED", "150").unwrap();
        store.set_value("TURN_SPEED", "90").unwrap();

        let once = rewrite(SKETCH, &store).document;
        let twice = rewrite(&once, &store).document;
        assert_eq!(once, twice);
    }

    #[test]
    fn test_rewrite_round_trip() {
        let mut store = extract(SKETCH);
        store.set_value("FOUND_SPEED", "255").unwrap();
        store.set_value("TURN_SPEED", "1.5f").unwrap();

        let outcome = rewrite(SKETCH, &store);
        let reextracted = extract(&outcome.document);
        for decl in store.iter() {
            assert_eq!(reextracted.get(&decl.name).unwrap().value, decl.value);
        }
    }

    #[test]
    fn test_rewrite_with_clean_store_is_noop() {
        let store = extract(SKETCH);
        let outcome = rewrite(SKETCH, &store);
        assert_eq!(outcome.document, SKETCH);
        assert!(outcome.applied.is_empty());
        assert!(outcome.is_clean());
    }

    #[test]
    fn test_anchor_miss_skips_only_that_declaration() {
        let mut store = extract(SKETCH);
        store.set_value("SEARCH_SPEED", "150").unwrap();
        store.set_value("FOUND_SPEED", "200").unwrap();

        // FOUND_SPEED edited out-of-band
        let edited = SKETCH.replace("int FOUND_SPEED = 100;", "int FOUND_SPEED = 120;");
        let outcome = rewrite(&edited, &store);

        assert!(outcome.document.contains("int SEARCH_SPEED = 150;"));
        assert!(outcome.document.contains("int FOUND_SPEED = 120;"));
        assert_eq!(outcome.applied, vec!["SEARCH_SPEED"]);
        assert_eq!(outcome.misses.len(), 1);
        assert!(matches!(&outcome.misses[0], SumoError::AnchorMiss { name } if name == "FOUND_SPEED"));
    }

    #[test]
    fn test_rewrite_without_region_returns_input() {
        let mut store = extract(SKETCH);
        store.set_value("SEARCH_SPEED", "150").unwrap();

        let outcome = rewrite("void loop() {}\n", &store);
        assert_eq!(outcome.document, "void loop() {}\n");
        assert!(matches!(outcome.misses[0], SumoError::RegionMissing { .. }));
    }

    #[test]
    fn test_replacement_value_is_literal() {
        let doc = "// Global variables\nString NAME = \"bot\";\n// Function prototypes\n";
        let mut store = extract(doc);
        store.set_value("NAME", "\"$1 bot\"").unwrap();
        let outcome = rewrite(doc, &store);
        assert!(outcome.document.contains("String NAME = \"$1 bot\";"));
    }

    #[test]
    fn test_commented_out_binding_is_untouched() {
        let doc = "// Global variables\n// int SEARCH_SPEED = 100;\nint SEARCH_SPEED = 100;\n\
                   // SEARCH_SPEED = 100;\n// Function prototypes\n";
        let mut store = extract(doc);
        store.set_value("SEARCH_SPEED", "150").unwrap();

        let outcome = rewrite(doc, &store);
        assert_eq!(
            outcome.document,
            "// Global variables\n// int SEARCH_SPEED = 100;\nint SEARCH_SPEED = 150;\n\
             // SEARCH_SPEED = 100;\n// Function prototypes\n"
        );
        assert_eq!(outcome.applied, vec!["SEARCH_SPEED"]);
    }
}
