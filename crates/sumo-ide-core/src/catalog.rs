//! Registry of named strategy snippets.
//!
//! A strategy is a function body plus the prototype that declares it and the
//! prototypes its body calls. The catalog is built once at start-up (built-ins, plus
//! an optional JSON file) and only read afterwards.
//!
//! Catalog keys are the canonical strategy names. Values coming from a UI or from a
//! sketch (`"searchanddestroy"`, `"\"SearchAndDestroy\""`) are resolved through
//! [`StrategyCatalog::canonical_name`] before lookup.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SumoError};
use crate::templates::embedded;

/// One injectable strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyDefinition {
    pub name: String,
    /// Single-statement forward declaration, e.g. `void SearchAndDestroy();`.
    pub prototype: String,
    /// Full function definition.
    pub implementation: String,
    /// Prototypes the implementation relies on, in the order they should appear.
    #[serde(default)]
    pub dependencies: Vec<String>,
}

impl StrategyDefinition {
    pub fn new(
        name: &str,
        prototype: &str,
        implementation: &str,
        dependencies: &[&str],
    ) -> Self {
        Self {
            name: name.to_string(),
            prototype: prototype.to_string(),
            implementation: implementation.trim_end().to_string(),
            dependencies: dependencies.iter().map(|d| d.to_string()).collect(),
        }
    }
}

/// Read-only, name-keyed strategy registry.
#[derive(Debug, Clone, Default)]
pub struct StrategyCatalog {
    strategies: IndexMap<String, StrategyDefinition>,
}

impl StrategyCatalog {
    /// Build a catalog from definitions. A later definition with the same name wins.
    pub fn from_definitions(definitions: impl IntoIterator<Item = StrategyDefinition>) -> Self {
        let strategies = definitions
            .into_iter()
            .map(|mut def| {
                def.implementation = def.implementation.trim_end().to_string();
                (def.name.clone(), def)
            })
            .collect();
        Self { strategies }
    }

    /// The strategies shipped with sumo-ide.
    pub fn builtin() -> Self {
        Self::from_definitions([
            StrategyDefinition::new(
                "SearchAndDestroy",
                "void SearchAndDestroy();",
                embedded::SEARCH_AND_DESTROY,
                &[
                    "void moveForward(int speed);",
                    "void moveBackward(int speed);",
                    "void turnLeft(int speed);",
                    "void turnRight(int speed);",
                ],
            ),
            StrategyDefinition::new(
                "aggressivePursuit",
                "void aggressivePursuit();",
                embedded::AGGRESSIVE_PURSUIT,
                &[
                    "void moveForward(int speed);",
                    "void turnRight(int speed);",
                    "void turnLeft(int speed);",
                ],
            ),
            StrategyDefinition::new(
                "InitialEvadeAndSearch",
                "void InitialEvadeAndSearch();",
                embedded::INITIAL_EVADE_AND_SEARCH,
                &[
                    "void moveBackward(int speed);",
                    "void turnLeft(int speed);",
                    "void SearchAndDestroy();",
                ],
            ),
        ])
    }

    /// Built-ins extended with the definitions in a JSON file (a list of
    /// [`StrategyDefinition`]). File entries override built-ins of the same name.
    pub fn load_with_builtin(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| SumoError::CatalogNotFound {
            path: path.to_path_buf(),
            source: e,
        })?;
        let extra: Vec<StrategyDefinition> =
            serde_json::from_str(&contents).map_err(|e| SumoError::CatalogParse {
                path: path.to_path_buf(),
                source: e,
            })?;
        tracing::info!(count = extra.len(), path = %path.display(), "loaded strategy catalog");
        Ok(Self::from_definitions(
            Self::builtin().strategies.into_values().chain(extra),
        ))
    }

    /// Look up a strategy by canonical name.
    pub fn lookup(&self, name: &str) -> Result<&StrategyDefinition> {
        self.strategies
            .get(name)
            .ok_or_else(|| SumoError::UnknownStrategy(name.to_string()))
    }

    /// Resolve a user- or sketch-supplied value to a catalog key.
    ///
    /// Surrounding whitespace and double quotes are ignored. An exact key wins;
    /// otherwise a single case-insensitive match is accepted. Ambiguous or unknown
    /// values resolve to `None`.
    pub fn canonical_name(&self, value: &str) -> Option<&str> {
        let bare = unquote(value);
        if let Some((key, _)) = self.strategies.get_key_value(bare) {
            return Some(key.as_str());
        }
        let mut matches = self
            .strategies
            .keys()
            .filter(|key| key.eq_ignore_ascii_case(bare));
        match (matches.next(), matches.next()) {
            (Some(key), None) => Some(key.as_str()),
            _ => None,
        }
    }

    /// The strategy whose prototype is exactly `prototype`, if any.
    pub fn by_prototype(&self, prototype: &str) -> Option<&StrategyDefinition> {
        self.strategies
            .values()
            .find(|def| def.prototype == prototype)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StrategyDefinition> {
        self.strategies.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.strategies.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

/// Strip whitespace and one pair of surrounding double quotes.
fn unquote(value: &str) -> &str {
    let trimmed = value.trim();
    trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed)
}
