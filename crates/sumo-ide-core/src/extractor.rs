//! Scan a sketch's globals region into a [`VariableStore`].

use crate::document::{self, Layout};
use crate::grammar;
use crate::store::{ControlKind, VariableDeclaration, VariableStore};

/// Extract every one-line declaration from the globals region of `text`.
///
/// A missing or malformed region yields an empty store; lines that do not match the
/// declaration grammar are skipped. A repeated name keeps the last line's value.
pub fn extract(text: &str) -> VariableStore {
    let mut store = VariableStore::new();

    let layout = match Layout::locate(text) {
        Ok(layout) => layout,
        Err(e) => {
            tracing::debug!("no globals region: {e}");
            return store;
        }
    };

    for (_, line) in document::lines(&text[layout.globals]) {
        let Some(decl) = grammar::parse_declaration(line) else {
            continue;
        };
        store.insert(VariableDeclaration {
            name: decl.name.to_string(),
            type_name: decl.type_name.to_string(),
            is_const: decl.is_const,
            value: decl.value.to_string(),
            original_value: decl.value.to_string(),
            kind: ControlKind::for_type(decl.type_name),
        });
    }

    tracing::debug!(count = store.len(), "extracted declarations");
    store
}
