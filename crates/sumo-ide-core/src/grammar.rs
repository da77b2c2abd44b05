//! Line grammar for the parts of a sketch the engine understands.
//!
//! The engine does not parse the sketch language. It matches single lines against a
//! small set of regex rules, all defined here so that extraction, rewriting and
//! injection agree on what a declaration or a prototype looks like.
//!
//! ```text
//! declaration:  [const ]<type> <identifier> = <value>;   [// comment]
//! prototype:    <return type> <identifier>(<params>);
//! anchor:       [const ]<type> <identifier> = <value>;   (for a known identifier/value)
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

/// A declaration line inside the globals region.
///
/// `type` may span several words (`unsigned long`); the identifier is the last word
/// before `=`. The value runs up to the first `;`.
static DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\s*(?P<const>const\s+)?(?P<type>[A-Za-z_]\w*(?:\s+[A-Za-z_]\w*)*?)\s+(?P<name>[A-Za-z_]\w*)\s*=\s*(?P<value>[^;]*?)\s*;\s*(?://.*)?$",
    )
    .unwrap()
});

/// A forward declaration inside the prototypes region.
static PROTOTYPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*[A-Za-z_][\w\s\*&:<>,]*?[\s\*&]+[A-Za-z_]\w*\s*\([^;{}]*\)\s*;\s*(?://.*)?$")
        .unwrap()
});

/// One `[const ]<type> <name> = <value>;` line, borrowed from the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationLine<'a> {
    pub is_const: bool,
    pub type_name: &'a str,
    pub name: &'a str,
    pub value: &'a str,
}

/// Match a single line against the declaration rule.
///
/// Returns `None` for comments, blank lines, multi-line expressions and anything else
/// that is not a complete one-line declaration.
pub fn parse_declaration(line: &str) -> Option<DeclarationLine<'_>> {
    let caps = DECLARATION.captures(line.trim_end_matches(['\r', '\n']))?;
    let value = caps.name("value")?.as_str().trim();
    if value.is_empty() {
        return None;
    }
    Some(DeclarationLine {
        is_const: caps.name("const").is_some(),
        type_name: caps.name("type")?.as_str(),
        name: caps.name("name")?.as_str(),
        value,
    })
}

/// Whether a line is a function prototype (`void turnLeft(int speed);`).
pub fn is_prototype(line: &str) -> bool {
    PROTOTYPE.is_match(line.trim_end_matches(['\r', '\n']))
}

/// Build the anchor rule for one declaration.
///
/// Captures `prefix` (everything up to and including `name = `), the literal `value`,
/// and `suffix` (`;`). The rule only matches at the start of a declaration line, so a
/// commented-out `// NAME = value;` is left alone; the identifier must be a whole word
/// after the type, and requiring the `;` keeps `100` from matching `1000`.
pub fn anchor(name: &str, value: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        r"(?m)^(?P<prefix>[ \t]*(?:const[ \t]+)?[A-Za-z_]\w*(?:[ \t]+[A-Za-z_]\w*)*?[ \t]+{}[ \t]*=[ \t]*)(?P<value>{})(?P<suffix>[ \t]*;)",
        regex::escape(name),
        regex::escape(value)
    ))
}
