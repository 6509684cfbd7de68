//! Filter state for a list view.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Categorical filter value meaning "no constraint on this field".
pub const ALL: &str = "all";

/// The free-text and categorical constraints currently applied to a list.
///
/// An empty (or whitespace-only) search term imposes no text constraint, and a
/// categorical value of [`ALL`] imposes none on its field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    /// Free-text search term
    #[serde(default)]
    pub search_term: String,
    /// Field name to required value
    #[serde(default)]
    pub categorical_filters: BTreeMap<String, String>,
}

impl FilterState {
    /// Create an empty filter state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search term.
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.set_search(term);
        self
    }

    /// Add a categorical constraint.
    pub fn with_filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_filter(field, value);
        self
    }

    /// Replace the search term.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Constrain `field` to `value`. Setting [`ALL`] removes the constraint.
    pub fn set_filter(&mut self, field: impl Into<String>, value: impl Into<String>) {
        let field = field.into();
        let value = value.into();
        if value == ALL {
            self.categorical_filters.remove(&field);
        } else {
            self.categorical_filters.insert(field, value);
        }
    }

    /// Drop the constraint on `field`.
    pub fn clear_filter(&mut self, field: &str) {
        self.categorical_filters.remove(field);
    }

    /// Clear search and every categorical constraint.
    pub fn reset(&mut self) {
        self.search_term.clear();
        self.categorical_filters.clear();
    }

    /// The trimmed, lowercased search needle, if any.
    pub fn search_needle(&self) -> Option<String> {
        let trimmed = self.search_term.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_lowercase())
        }
    }

    /// Categorical constraints that actually restrict something.
    ///
    /// Deserialized states may still carry explicit `"all"` entries.
    pub fn active_filters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.categorical_filters
            .iter()
            .filter(|(_, value)| value.as_str() != ALL)
            .map(|(field, value)| (field.as_str(), value.as_str()))
    }

    /// Whether any constraint is in effect.
    pub fn is_active(&self) -> bool {
        self.search_needle().is_some() || self.active_filters().next().is_some()
    }
}
