//! One editing session: a document, its extracted store, and the pending rewrite.
//!
//! The session is the single owner of the document/store pair. Every event is a method
//! call, handled synchronously:
//!
//! | event | effect |
//! |---|---|
//! | [`EditingSession::load`] | replace the document, re-extract |
//! | [`EditingSession::set_value`] | update the store, inject a strategy if needed, (re)schedule the rewrite |
//! | [`EditingSession::poll`] | run the rewrite once the debounce window has passed |
//! | [`EditingSession::edit_document`] | raw text edit: drop the pending rewrite, re-extract |
//!
//! Recoverable problems (anchor misses, unknown strategies, missing regions) never
//! fail the call that triggered them; they are queued as [`Notice`]s for the UI.

use std::sync::Arc;
use std::time::Instant;

use crate::catalog::StrategyCatalog;
use crate::config::EditorConfig;
use crate::debounce::Debouncer;
use crate::error::{Result, SumoError};
use crate::extractor;
use crate::injector;
use crate::rewriter;
use crate::store::{ControlKind, VariableStore};

/// A non-blocking problem to surface to the user.
#[derive(Debug)]
pub struct Notice(pub SumoError);

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The active editing session.
pub struct EditingSession {
    document: String,
    store: VariableStore,
    catalog: Arc<StrategyCatalog>,
    config: EditorConfig,
    debouncer: Debouncer,
    notices: Vec<Notice>,
}

impl EditingSession {
    pub fn new(config: EditorConfig, catalog: Arc<StrategyCatalog>) -> Self {
        Self {
            document: String::new(),
            store: VariableStore::new(),
            catalog,
            debouncer: Debouncer::new(config.debounce_window()),
            config,
            notices: Vec::new(),
        }
    }

    /// A session over `text` with the given collaborators.
    pub fn with_document(
        text: impl Into<String>,
        config: EditorConfig,
        catalog: Arc<StrategyCatalog>,
    ) -> Self {
        let mut session = Self::new(config, catalog);
        session.load(text);
        session
    }

    pub fn document(&self) -> &str {
        &self.document
    }

    pub fn store(&self) -> &VariableStore {
        &self.store
    }

    pub fn catalog(&self) -> &StrategyCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Whether a rewrite is waiting for the debounce window.
    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// When the pending rewrite will run, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Replace the document (file opened) and re-extract the store.
    pub fn load(&mut self, text: impl Into<String>) {
        self.document = text.into();
        self.debouncer.cancel();
        self.resync();
        tracing::info!(variables = self.store.len(), "sketch loaded");
    }

    /// Raw edit in the text view. Any pending rewrite is dropped since its snapshot
    /// is stale; controls whose declaration no longer parses disappear from the store.
    pub fn edit_document(&mut self, text: impl Into<String>) {
        if self.debouncer.is_pending() {
            tracing::debug!("raw edit dropped pending rewrite");
        }
        self.document = text.into();
        self.debouncer.cancel();
        self.resync();
    }

    /// A control changed `name` to `value` at `now`.
    ///
    /// Strategy selectors are normalised to the catalog's canonical name and the
    /// strategy is injected immediately; the value substitution itself is debounced.
    /// Fails without side effects for an unknown variable or an invalid value.
    pub fn set_value(&mut self, name: &str, value: &str, now: Instant) -> Result<()> {
        let decl = self
            .store
            .get(name)
            .ok_or_else(|| SumoError::UnknownVariable(name.to_string()))?;
        let kind = decl.kind;
        let quoted = decl.original_value.starts_with('"');
        let value = value.trim();
        kind.validate(name, value)?;

        let value = if kind == ControlKind::Strategy {
            let canonical = self
                .catalog
                .canonical_name(value)
                .ok_or_else(|| SumoError::UnknownStrategy(value.to_string()))
                .inspect_err(|e| tracing::warn!(variable = name, "{e}"))?
                .to_string();
            self.inject(&canonical);
            if quoted {
                format!("\"{canonical}\"")
            } else {
                canonical
            }
        } else {
            value.to_string()
        };

        self.store.set_value(name, value)?;
        self.debouncer.schedule(now);
        Ok(())
    }

    /// Inject a strategy by (possibly non-canonical) name, outside of any control.
    ///
    /// Returns whether the document changed. Failures become notices.
    pub fn ensure_strategy(&mut self, name: &str) -> bool {
        match self.catalog.canonical_name(name) {
            Some(canonical) => {
                let canonical = canonical.to_string();
                self.inject(&canonical)
            }
            None => {
                tracing::warn!(strategy = name, "unknown strategy");
                self.notices
                    .push(Notice(SumoError::UnknownStrategy(name.to_string())));
                false
            }
        }
    }

    /// Run the pending rewrite if the debounce window has passed at `now`.
    ///
    /// Returns whether a rewrite ran.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.debouncer.fire_if_due(now) {
            self.flush();
            true
        } else {
            false
        }
    }

    /// Run the rewrite now with the latest store, discarding the pending schedule.
    pub fn flush(&mut self) {
        self.debouncer.cancel();
        let outcome = rewriter::rewrite(&self.document, &self.store);
        self.document = outcome.document;
        for name in &outcome.applied {
            self.store.commit(name);
        }
        self.notices.extend(outcome.misses.into_iter().map(Notice));
    }

    /// Drain queued notices.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Consume the session, returning the final document.
    pub fn into_document(self) -> String {
        self.document
    }

    fn inject(&mut self, canonical: &str) -> bool {
        match injector::ensure_strategy(&self.document, &self.catalog, canonical) {
            Ok(injection) => {
                let changed = !injection.is_unchanged();
                self.document = injection.document;
                changed
            }
            Err(e) => {
                self.notices.push(Notice(e));
                false
            }
        }
    }

    fn resync(&mut self) {
        self.store = extractor::extract(&self.document);
        let selectors: Vec<String> = self
            .store
            .names()
            .filter(|n| self.config.is_strategy_variable(n))
            .map(str::to_string)
            .collect();
        for name in selectors {
            self.store.set_kind(&name, ControlKind::Strategy);
        }
    }
}
