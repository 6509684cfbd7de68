//! Stateful form.

use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use crate::engine::{FormReport, FormSchema, FormValidationEngine};
use crate::error::{FormError, Result};
use crate::server_errors::ServerErrors;
use crate::state::FormState;

/// A mounted form: schema, current values, touched fields and the last
/// backend errors.
#[derive(Debug, Clone)]
pub struct Form {
    engine: FormValidationEngine,
    state: FormState,
    touched: BTreeSet<String>,
    server_errors: ServerErrors,
}

impl Form {
    /// Mount a form over initial values from the server.
    pub fn new(schema: FormSchema, initial: FormState) -> Self {
        Self {
            engine: FormValidationEngine::new(schema),
            state: initial,
            touched: BTreeSet::new(),
            server_errors: ServerErrors::new(),
        }
    }

    pub fn engine(&self) -> &FormValidationEngine {
        &self.engine
    }

    pub fn schema(&self) -> &FormSchema {
        self.engine.schema()
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn value(&self, name: &str) -> &str {
        self.state.get(name)
    }

    /// Set a field's value.
    ///
    /// Fields that this change hides are cleared; their names are returned.
    /// The field's pending server error is dropped since the user has
    /// responded to it, as is the server error of every field now hidden.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> Result<Vec<String>> {
        if !self.engine.schema().contains(name) {
            return Err(FormError::UnknownField(name.to_string()));
        }

        let previous = self.state.clone();
        self.state.set(name, value);
        self.touched.insert(name.to_string());
        self.server_errors.remove(name);

        let reset = self.engine.apply_resets(&previous, &mut self.state);
        let hidden: Vec<String> = self
            .schema()
            .fields()
            .iter()
            .filter(|f| !f.is_visible(&self.state))
            .map(|f| f.name().to_string())
            .collect();
        for field in &hidden {
            self.server_errors.remove(field);
        }
        debug!(field = %name, reset = reset.len(), "Form value changed");
        Ok(reset)
    }

    /// Mark a field as visited without changing it.
    pub fn touch(&mut self, name: &str) {
        self.touched.insert(name.to_string());
    }

    pub fn is_touched(&self, name: &str) -> bool {
        self.touched.contains(name)
    }

    pub fn touched(&self) -> impl Iterator<Item = &str> {
        self.touched.iter().map(String::as_str)
    }

    /// Visible fields' values, flattened for submission.
    pub fn values(&self) -> BTreeMap<String, String> {
        self.engine
            .visible_fields(&self.state)
            .map(|f| (f.name().to_string(), self.state.get(f.name()).to_string()))
            .collect()
    }

    /// Client-side validation only.
    pub fn validate(&self) -> FormReport {
        self.engine.validate_form(&self.state)
    }

    /// Record a rejected submission's field errors.
    ///
    /// Errors for fields the schema does not declare are kept too, so they can
    /// be shown in a form-level alert.
    pub fn merge_server_errors(&mut self, errors: ServerErrors) {
        debug!(count = errors.len(), "Merging server validation errors");
        for (field, message) in errors.iter() {
            self.server_errors.insert(field, message);
        }
    }

    pub fn server_errors(&self) -> &ServerErrors {
        &self.server_errors
    }

    pub fn clear_server_errors(&mut self) {
        self.server_errors = ServerErrors::new();
    }

    /// Client errors with server errors merged in. A client error for a field
    /// takes precedence over the server's; hidden fields report nothing.
    pub fn errors(&self) -> BTreeMap<String, String> {
        let mut errors = self.validate().errors;
        for (field, message) in self.server_errors.iter() {
            if self.is_hidden(field) {
                continue;
            }
            errors
                .entry(field.to_string())
                .or_insert_with(|| message.to_string());
        }
        errors
    }

    /// Errors worth showing inline: fields the user has touched, plus every
    /// server error.
    pub fn displayed_errors(&self) -> BTreeMap<String, String> {
        self.errors()
            .into_iter()
            .filter(|(field, _)| self.is_touched(field) || self.server_errors.get(field).is_some())
            .collect()
    }

    /// A declared field whose display predicate is false.
    fn is_hidden(&self, name: &str) -> bool {
        self.schema()
            .field(name)
            .is_some_and(|f| !f.is_visible(&self.state))
    }

    /// Replace every value, e.g. from a restored draft. Touched state and
    /// server errors are cleared.
    pub fn load_values(&mut self, values: BTreeMap<String, String>) {
        self.state = FormState::from(values);
        self.touched.clear();
        self.clear_server_errors();
    }
}
