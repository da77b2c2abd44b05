//! Extracted declarations and their live values.
//!
//! A [`VariableStore`] is produced wholesale by [`crate::extractor::extract`] and then
//! mutated only through [`VariableStore::set_value`]. Each declaration remembers two
//! values:
//! - `value`: what the user currently wants
//! - `original_value`: what is literally in the document, used as the rewrite anchor

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SumoError};

/// The kind of UI control a declaration is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlKind {
    /// Integer or floating point field.
    Numeric,
    /// On/off switch.
    Toggle,
    /// Strategy selector backed by the strategy catalog.
    Strategy,
    /// Free text.
    Text,
}

const NUMERIC_TYPES: &[&str] = &[
    "int", "long", "short", "byte", "word", "float", "double", "unsigned", "signed", "size_t",
    "int8_t", "int16_t", "int32_t", "int64_t", "uint8_t", "uint16_t", "uint32_t", "uint64_t",
];

impl ControlKind {
    /// Classify a declaration from its type token.
    ///
    /// Strategy selectors are named in configuration, not typed, so they are decided
    /// by the caller.
    pub fn for_type(type_name: &str) -> Self {
        let mut words = type_name.split_whitespace();
        match words.next() {
            Some("bool" | "boolean") => Self::Toggle,
            Some(first) if NUMERIC_TYPES.contains(&first) => Self::Numeric,
            _ => Self::Text,
        }
    }

    /// Check that `value` is acceptable for this control.
    ///
    /// Strategy values are checked against the catalog by the session, not here.
    pub fn validate(self, name: &str, value: &str) -> Result<()> {
        // a declaration is one line; a break would split it out of the grammar
        let ok = !value.contains(['\n', '\r'])
            && match self {
                Self::Numeric => is_numeric_literal(value),
                Self::Toggle => matches!(value, "true" | "false" | "HIGH" | "LOW"),
                Self::Strategy | Self::Text => !value.is_empty() && !value.contains(';'),
            };
        if ok {
            Ok(())
        } else {
            Err(SumoError::InvalidValue {
                name: name.to_string(),
                value: value.to_string(),
                expected: self.expected(),
            })
        }
    }

    fn expected(self) -> &'static str {
        match self {
            Self::Numeric => "a number",
            Self::Toggle => "true/false or HIGH/LOW",
            Self::Strategy => "a strategy name",
            Self::Text => "a non-empty single-line value without ';'",
        }
    }
}

/// Integer, hex or decimal literal, with an optional sign and C suffixes (`10UL`, `1.5f`).
fn is_numeric_literal(value: &str) -> bool {
    let digits = value.strip_prefix(['-', '+']).unwrap_or(value);
    if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        return !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit());
    }
    let body = digits.trim_end_matches(['u', 'U', 'l', 'L', 'f', 'F']);
    body.starts_with(|c: char| c.is_ascii_digit() || c == '.') && body.parse::<f64>().is_ok()
}

/// One `[const ]<type> <name> = <value>;` binding from the globals region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableDeclaration {
    pub name: String,
    /// Type token as written, e.g. `int` or `unsigned long`.
    pub type_name: String,
    pub is_const: bool,
    /// Live, user-editable value.
    pub value: String,
    /// Value last known to be literally present in the document.
    pub original_value: String,
    pub kind: ControlKind,
}

impl VariableDeclaration {
    /// Whether the live value differs from the document.
    pub fn is_dirty(&self) -> bool {
        self.value != self.original_value
    }
}

/// Ordered mapping of declaration name to declaration, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableStore {
    declarations: IndexMap<String, VariableDeclaration>,
}

impl VariableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a declaration. A repeated name replaces the earlier entry.
    pub(crate) fn insert(&mut self, declaration: VariableDeclaration) {
        self.declarations
            .insert(declaration.name.clone(), declaration);
    }

    pub fn get(&self, name: &str) -> Option<&VariableDeclaration> {
        self.declarations.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.declarations.contains_key(name)
    }

    /// Set the live value of an existing declaration.
    ///
    /// The store never invents names: an unknown name is an error. A value spanning
    /// several lines is rejected.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        let declaration = self
            .declarations
            .get_mut(name)
            .ok_or_else(|| SumoError::UnknownVariable(name.to_string()))?;
        let value = value.into();
        let value = value.trim();
        if value.contains(['\n', '\r']) {
            return Err(SumoError::InvalidValue {
                name: name.to_string(),
                value: value.to_string(),
                expected: "a single-line value",
            });
        }
        declaration.value = value.to_string();
        Ok(())
    }

    /// Mark `name`'s live value as now present in the document.
    pub(crate) fn commit(&mut self, name: &str) {
        if let Some(declaration) = self.declarations.get_mut(name) {
            declaration.original_value = declaration.value.clone();
        }
    }

    /// Re-classify a declaration's control, e.g. as a strategy selector.
    pub(crate) fn set_kind(&mut self, name: &str, kind: ControlKind) {
        if let Some(declaration) = self.declarations.get_mut(name) {
            declaration.kind = kind;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &VariableDeclaration> {
        self.declarations.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.declarations.keys().map(String::as_str)
    }

    /// Declarations whose live value has not been written to the document yet.
    pub fn dirty(&self) -> impl Iterator<Item = &VariableDeclaration> {
        self.iter().filter(|d| d.is_dirty())
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}
