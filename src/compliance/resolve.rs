//! Component id to display-name lookup for dependency results.

use crate::model::Document;
use std::collections::HashMap;

/// Maps component ids to names for one evaluation run.
///
/// Built from the document's own components. Callers may add entries for
/// ids that only appear in relationships (e.g. components described in a
/// separate document).
#[derive(Debug, Clone, Default)]
pub struct ResolutionContext {
    names: HashMap<String, String>,
}

impl ResolutionContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every component with a non-empty id and name.
    #[must_use]
    pub fn from_document(document: &dyn Document) -> Self {
        let mut ctx = Self::new();
        for component in document.components() {
            ctx.insert(component.id(), component.name());
        }
        ctx
    }

    /// Register a name. Blank ids or names are ignored; the first name wins.
    pub fn insert(&mut self, id: &str, name: &str) {
        if id.trim().is_empty() || name.trim().is_empty() {
            return;
        }
        self.names
            .entry(id.to_string())
            .or_insert_with(|| name.to_string());
    }

    /// Name for `id`, or `id` itself when unknown.
    #[must_use]
    pub fn resolve<'a>(&'a self, id: &'a str) -> &'a str {
        self.names.get(id).map_or(id, String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
