//! Idempotent insertion of strategy snippets into a sketch.
//!
//! Presence in the text is the only injection state: a prototype that already occurs
//! verbatim anywhere in the document is not inserted again, and a strategy whose
//! prototype is present is assumed to have its body too.
//!
//! New prototypes go at the end of the prototypes region, after any existing ones and
//! in dependency order. Strategy bodies are appended at the end of the document.
//! A dependency that is itself the prototype of a catalog strategy pulls in that
//! strategy (prototype and body) before the dependent one.
//!
//! Dependencies are checked even when the strategy itself is already present. Missing
//! ones then go directly above that strategy's prototype line, so every dependency
//! still precedes it; everything else goes at the end of the region.

use std::collections::HashSet;

use crate::catalog::{StrategyCatalog, StrategyDefinition};
use crate::document::Layout;
use crate::error::Result;

/// Result of [`ensure_strategy`].
#[derive(Debug, Clone)]
pub struct Injection {
    pub document: String,
    /// Prototypes inserted, in insertion order.
    pub inserted_prototypes: Vec<String>,
    /// Strategies whose bodies were appended, in order.
    pub appended_bodies: Vec<String>,
}

impl Injection {
    /// Whether the document already had everything.
    pub fn is_unchanged(&self) -> bool {
        self.inserted_prototypes.is_empty() && self.appended_bodies.is_empty()
    }
}

/// Make sure `name` and everything it depends on is present in `text`.
///
/// `name` must be a catalog key (see [`StrategyCatalog::canonical_name`]). Fails with
/// [`crate::error::SumoError::UnknownStrategy`] for an unknown name and with
/// [`crate::error::SumoError::RegionMissing`] when the sketch has no prototypes
/// region to insert into; the input text is untouched in both cases.
pub fn ensure_strategy(text: &str, catalog: &StrategyCatalog, name: &str) -> Result<Injection> {
    let strategy = catalog.lookup(name).inspect_err(|e| {
        tracing::warn!("{e}");
    })?;

    let mut plan = Plan::default();
    plan.strategy(text, catalog, strategy, &mut HashSet::new());

    if plan.prototypes.is_empty() {
        tracing::debug!(strategy = name, "already present");
        return Ok(Injection {
            document: text.to_string(),
            inserted_prototypes: Vec::new(),
            appended_bodies: Vec::new(),
        });
    }

    let layout = Layout::locate(text).inspect_err(|e| {
        tracing::warn!(strategy = name, "cannot inject: {e}");
    })?;
    let end = layout.prototypes.end;
    let lead = plan.leading_point(text, &layout).unwrap_or(end);
    let (leading, trailing): (Vec<_>, Vec<_>) = plan
        .prototypes
        .iter()
        .enumerate()
        .partition(|(i, _)| lead < end && plan.leading.contains(i));

    let mut document = String::with_capacity(
        text.len() + plan.bodies.iter().map(|b| b.len() + 2).sum::<usize>() + 256,
    );
    document.push_str(&text[..lead]);
    push_prototypes(&mut document, leading);
    document.push_str(&text[lead..end]);
    if !document.is_empty() && !document.ends_with('\n') {
        document.push('\n');
    }
    push_prototypes(&mut document, trailing);
    document.push_str(&text[end..]);

    for body in &plan.bodies {
        append_body(&mut document, body);
    }

    tracing::info!(
        strategy = name,
        prototypes = plan.prototypes.len(),
        bodies = plan.names.len(),
        "strategy injected"
    );
    Ok(Injection {
        document,
        inserted_prototypes: plan.prototypes,
        appended_bodies: plan.names,
    })
}

fn push_prototypes(document: &mut String, prototypes: Vec<(usize, &String)>) {
    for (_, prototype) in prototypes {
        tracing::debug!(prototype = %prototype, "inserting prototype");
        document.push_str(prototype);
        document.push('\n');
    }
}

/// Append a body separated from the preceding text by exactly one blank line.
fn append_body(document: &mut String, body: &str) {
    if !document.is_empty() {
        if !document.ends_with('\n') {
            document.push('\n');
        }
        if !document.ends_with("\n\n") {
            document.push('\n');
        }
    }
    document.push_str(body);
    document.push('\n');
}

/// What has to be inserted, computed against the unmodified text.
#[derive(Default)]
struct Plan<'c> {
    prototypes: Vec<String>,
    bodies: Vec<String>,
    names: Vec<String>,
    /// Indices into `prototypes` that an already-present strategy depends on.
    leading: HashSet<usize>,
    /// Prototypes already in the text that the `leading` ones must precede.
    present: Vec<&'c str>,
}

impl<'c> Plan<'c> {
    fn has_prototype(&self, text: &str, prototype: &str) -> bool {
        text.contains(prototype) || self.prototypes.iter().any(|p| p == prototype)
    }

    fn strategy(
        &mut self,
        text: &str,
        catalog: &'c StrategyCatalog,
        strategy: &'c StrategyDefinition,
        visiting: &mut HashSet<&'c str>,
    ) {
        if !visiting.insert(strategy.name.as_str()) {
            return;
        }
        let present = self.has_prototype(text, &strategy.prototype);

        for dependency in &strategy.dependencies {
            match catalog.by_prototype(dependency) {
                Some(nested) => self.strategy(text, catalog, nested, visiting),
                None if !self.has_prototype(text, dependency) => {
                    self.prototypes.push(dependency.clone());
                }
                None => {}
            }
        }

        if !present {
            self.prototypes.push(strategy.prototype.clone());
            self.bodies.push(strategy.implementation.clone());
            self.names.push(strategy.name.clone());
        } else if text.contains(&strategy.prototype) {
            let before = self.leading.len();
            for dependency in &strategy.dependencies {
                self.lead(catalog, dependency);
            }
            if self.leading.len() > before {
                self.present.push(strategy.prototype.as_str());
            }
        }
    }

    /// Mark a planned prototype, and the planned prototypes it depends on, as leading.
    fn lead(&mut self, catalog: &StrategyCatalog, prototype: &str) {
        let Some(index) = self.prototypes.iter().position(|p| p == prototype) else {
            return;
        };
        if !self.leading.insert(index) {
            return;
        }
        if let Some(nested) = catalog.by_prototype(prototype) {
            for dependency in &nested.dependencies {
                self.lead(catalog, dependency);
            }
        }
    }

    /// Start of the first prototypes-region line holding a present prototype whose
    /// dependencies are being inserted.
    fn leading_point(&self, text: &str, layout: &Layout) -> Option<usize> {
        let region = &text[layout.prototypes.clone()];
        self.present
            .iter()
            .filter_map(|prototype| region.find(prototype))
            .map(|pos| layout.prototypes.start + region[..pos].rfind('\n').map_or(0, |i| i + 1))
            .min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SumoError;

    const SKETCH: &str = "\
// Global variables
int SEARCH_SPEED = 100;
String STRATEGY = \"SearchAndDestroy\";
// Function prototypes
void moveForward(int speed);
void stopMotors();

void setup() {
}

void loop() {
}
";

    fn count(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    #[test]
    fn test_inject_search_and_destroy() {
        let catalog = StrategyCatalog::builtin();
        let injection = ensure_strategy(SKETCH, &catalog, "SearchAndDestroy").unwrap();
        let doc = &injection.document;

        assert_eq!(
            injection.inserted_prototypes,
            vec![
                "void moveBackward(int speed);",
                "void turnLeft(int speed);",
                "void turnRight(int speed);",
                "void SearchAndDestroy();",
            ]
        );
        assert_eq!(injection.appended_bodies, vec!["SearchAndDestroy"]);
        assert!(doc.contains(
            "void moveForward(int speed);\nvoid stopMotors();\nvoid moveBackward(int speed);\n\
             void turnLeft(int speed);\nvoid turnRight(int speed);\nvoid SearchAndDestroy();\n\n\
             void setup() {"
        ));
        assert!(doc.contains("void loop() {\n}\n\nvoid SearchAndDestroy() {\n"));
        assert!(doc.ends_with("}\n"));
        assert_eq!(count(doc, "void moveForward(int speed);"), 1);
    }

    #[test]
    fn test_inject_twice_is_idempotent() {
        let catalog = StrategyCatalog::builtin();
        let once = ensure_strategy(SKETCH, &catalog, "SearchAndDestroy").unwrap();
        let twice = ensure_strategy(&once.document, &catalog, "SearchAndDestroy").unwrap();

        assert_eq!(once.document, twice.document);
        assert!(twice.is_unchanged());
        assert_eq!(count(&twice.document, "void SearchAndDestroy();"), 1);
        assert_eq!(count(&twice.document, "void SearchAndDestroy() {"), 1);
    }

    #[test]
    fn test_inject_same_start_twice_gives_same_output() {
        let catalog = StrategyCatalog::builtin();
        let a = ensure_strategy(SKETCH, &catalog, "SearchAndDestroy").unwrap();
        let b = ensure_strategy(SKETCH, &catalog, "SearchAndDestroy").unwrap();
        assert_eq!(a.document, b.document);
    }

    #[test]
    fn test_dependencies_precede_prototype() {
        let catalog = StrategyCatalog::builtin();
        for def in catalog.iter() {
            let doc = ensure_strategy(SKETCH, &catalog, &def.name).unwrap().document;
            let own = doc.find(&def.prototype).unwrap();
            for dependency in &def.dependencies {
                let at = doc.find(dependency.as_str()).unwrap();
                assert!(at < own, "{dependency} after {}", def.prototype);
            }
        }
    }

    #[test]
    fn test_nested_strategy_dependency_is_injected() {
        let catalog = StrategyCatalog::builtin();
        let injection = ensure_strategy(SKETCH, &catalog, "InitialEvadeAndSearch").unwrap();
        let doc = &injection.document;

        assert_eq!(
            injection.appended_bodies,
            vec!["SearchAndDestroy", "InitialEvadeAndSearch"]
        );
        assert_eq!(count(doc, "void SearchAndDestroy();"), 1);
        assert_eq!(count(doc, "void SearchAndDestroy() {"), 1);
        assert!(doc.find("void SearchAndDestroy();").unwrap()
            < doc.find("void InitialEvadeAndSearch();").unwrap());
        assert!(doc.find("void SearchAndDestroy() {").unwrap()
            < doc.find("void InitialEvadeAndSearch() {").unwrap());

        let again = ensure_strategy(doc, &catalog, "SearchAndDestroy").unwrap();
        assert!(again.is_unchanged());
    }

    #[test]
    fn test_existing_lines_are_preserved() {
        let catalog = StrategyCatalog::builtin();
        let doc = ensure_strategy(SKETCH, &catalog, "aggressivePursuit")
            .unwrap()
            .document;

        let original: Vec<&str> = SKETCH.lines().collect();
        let mut remaining = doc.lines();
        for line in original {
            assert!(
                remaining.any(|l| l == line),
                "line {line:?} missing or reordered"
            );
        }
    }

    #[test]
    fn test_unknown_strategy_leaves_document() {
        let catalog = StrategyCatalog::builtin();
        let err = ensure_strategy(SKETCH, &catalog, "DoesNotExist").unwrap_err();
        assert!(matches!(err, SumoError::UnknownStrategy(name) if name == "DoesNotExist"));
    }

    #[test]
    fn test_missing_prototypes_region() {
        let catalog = StrategyCatalog::builtin();
        let err = ensure_strategy("void loop() {}\n", &catalog, "aggressivePursuit").unwrap_err();
        assert!(matches!(err, SumoError::RegionMissing { .. }));
    }

    #[test]
    fn test_marker_at_end_without_newline() {
        let catalog = StrategyCatalog::from_definitions([StrategyDefinition::new(
            "spin",
            "void spin();",
            "void spin() {\n}",
            &["void turnLeft(int speed);"],
        )]);
        let doc = "// Global variables\n// Function prototypes";
        let injection = ensure_strategy(doc, &catalog, "spin").unwrap();
        assert_eq!(
            injection.document,
            "// Global variables\n// Function prototypes\nvoid turnLeft(int speed);\nvoid spin();\n\nvoid spin() {\n}\n"
        );
    }

    #[test]
    fn test_dependency_cycle_terminates() {
        let catalog = StrategyCatalog::from_definitions([
            StrategyDefinition::new("a", "void a();", "void a() { b(); }", &["void b();"]),
            StrategyDefinition::new("b", "void b();", "void b() { a(); }", &["void a();"]),
        ]);
        let doc = "// Global variables\n// Function prototypes\n";
        let injection = ensure_strategy(doc, &catalog, "a").unwrap();
        assert_eq!(injection.inserted_prototypes, vec!["void b();", "void a();"]);
        assert_eq!(count(&injection.document, "void a() {"), 1);
        assert_eq!(count(&injection.document, "void b() {"), 1);
    }

    #[test]
    fn test_missing_dependencies_added_when_strategy_present() {
        let catalog = StrategyCatalog::builtin();
        let doc = "// Global variables\nint A = 1;\n// Function prototypes\n\
                   void SearchAndDestroy();\n\nvoid SearchAndDestroy() {\n}\n";
        let injection = ensure_strategy(doc, &catalog, "SearchAndDestroy").unwrap();

        assert!(injection.appended_bodies.is_empty());
        assert_eq!(
            injection.document,
            "// Global variables\nint A = 1;\n// Function prototypes\n\
             void moveForward(int speed);\nvoid moveBackward(int speed);\n\
             void turnLeft(int speed);\nvoid turnRight(int speed);\n\
             void SearchAndDestroy();\n\nvoid SearchAndDestroy() {\n}\n"
        );
        assert_eq!(count(&injection.document, "void SearchAndDestroy() {"), 1);

        let again = ensure_strategy(&injection.document, &catalog, "SearchAndDestroy").unwrap();
        assert!(again.is_unchanged());
    }

    #[test]
    fn test_partial_dependencies_go_above_present_strategy() {
        let catalog = StrategyCatalog::builtin();
        let doc = "// Global variables\n// Function prototypes\n\
                   void moveForward(int speed);\nvoid SearchAndDestroy();\nvoid turnLeft(int speed);\n\
                   \nvoid SearchAndDestroy() {\n}\n";
        let injection = ensure_strategy(doc, &catalog, "SearchAndDestroy").unwrap();

        assert_eq!(
            injection.inserted_prototypes,
            vec!["void moveBackward(int speed);", "void turnRight(int speed);"]
        );
        assert!(injection.document.contains(
            "void moveForward(int speed);\nvoid moveBackward(int speed);\n\
             void turnRight(int speed);\nvoid SearchAndDestroy();\nvoid turnLeft(int speed);\n"
        ));
        let own = injection.document.find("void SearchAndDestroy();").unwrap();
        for prototype in &injection.inserted_prototypes {
            assert!(injection.document.find(prototype.as_str()).unwrap() < own);
        }
    }

    #[test]
    fn test_dependency_behind_comment_in_prototypes_region() {
        let catalog = StrategyCatalog::builtin();
        let doc = "// Global variables\nint A = 1;\n// Function prototypes\n\
                   void moveForward(int speed);\n// turning\nvoid turnLeft(int speed);\n\
                   \nvoid loop() {\n}\n";
        let injection = ensure_strategy(doc, &catalog, "aggressivePursuit").unwrap();
        let result = &injection.document;

        assert_eq!(
            injection.inserted_prototypes,
            vec!["void turnRight(int speed);", "void aggressivePursuit();"]
        );
        assert_eq!(count(result, "void turnLeft(int speed);"), 1);
        assert_eq!(count(result, "void moveForward(int speed);"), 1);

        let mut remaining = result.lines();
        for line in doc.lines() {
            assert!(remaining.any(|l| l == line), "line {line:?} missing or reordered");
        }
    }

    #[test]
    fn test_outer_strategy_stays_below_present_nested_one() {
        let catalog = StrategyCatalog::builtin();
        let doc = "// Global variables\n// Function prototypes\nvoid SearchAndDestroy();\n\
                   \nvoid SearchAndDestroy() {\n}\n";
        let injection = ensure_strategy(doc, &catalog, "InitialEvadeAndSearch").unwrap();
        let result = &injection.document;

        assert_eq!(injection.appended_bodies, vec!["InitialEvadeAndSearch"]);
        assert_eq!(count(result, "void SearchAndDestroy();"), 1);
        assert_eq!(count(result, "void SearchAndDestroy() {"), 1);
        for def in catalog.iter() {
            let Some(own) = result.find(&def.prototype) else {
                continue;
            };
            for dependency in &def.dependencies {
                let at = result.find(dependency.as_str()).unwrap();
                assert!(at < own, "{dependency} after {}", def.prototype);
            }
        }
        assert!(ensure_strategy(result, &catalog, "InitialEvadeAndSearch")
            .unwrap()
            .is_unchanged());
    }
}
