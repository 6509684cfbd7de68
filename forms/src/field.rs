//! Field declarations.

use std::fmt;
use std::sync::Arc;

use crate::state::FormState;
use crate::validation::{ValidationResult, Validator};

/// Display predicate over the whole form state.
pub type VisibilityRule = Arc<dyn Fn(&FormState) -> bool + Send + Sync>;

/// One declared form field.
#[derive(Clone)]
pub struct FormField {
    name: String,
    label: String,
    required: bool,
    validator: Option<Validator>,
    visible_when: Option<VisibilityRule>,
}

impl FormField {
    /// An optional, always-visible field with no validator.
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            required: false,
            validator: None,
            visible_when: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn visible_when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&FormState) -> bool + Send + Sync + 'static,
    {
        self.visible_when = Some(Arc::new(predicate));
        self
    }

    /// Visible while `controller` holds exactly `value`.
    pub fn visible_when_equals(self, controller: &str, value: &str) -> Self {
        let controller = controller.to_string();
        let value = value.to_string();
        self.visible_when(move |state| state.get(&controller) == value)
    }

    /// Visible while `controller` holds any of `values`.
    pub fn visible_when_in(self, controller: &str, values: &[&str]) -> Self {
        let controller = controller.to_string();
        let values: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        self.visible_when(move |state| values.iter().any(|v| v == state.get(&controller)))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Fields without a predicate are always visible.
    pub fn is_visible(&self, state: &FormState) -> bool {
        self.visible_when.as_ref().map_or(true, |rule| rule(state))
    }

    /// Whether visibility depends on other values at all.
    pub fn is_conditional(&self) -> bool {
        self.visible_when.is_some()
    }

    /// Run the declared validator, ignoring visibility and `required`.
    pub fn run_validator(&self, value: &str) -> ValidationResult {
        self.validator
            .as_ref()
            .map_or(ValidationResult::Valid, |validator| validator(value))
    }
}

impl fmt::Debug for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormField")
            .field("name", &self.name)
            .field("label", &self.label)
            .field("required", &self.required)
            .field("has_validator", &self.validator.is_some())
            .field("conditional", &self.visible_when.is_some())
            .finish()
    }
}
