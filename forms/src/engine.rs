//! Schema evaluation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

#[cfg(feature = "typescript")]
use ts_rs::TS;

use crate::field::FormField;
use crate::rules::CrossFieldRule;
use crate::state::FormState;
use crate::validation::ValidationResult;

/// Fields plus form-level rules.
#[derive(Debug, Clone, Default)]
pub struct FormSchema {
    fields: Vec<FormField>,
    rules: Vec<CrossFieldRule>,
}

impl FormSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, field: FormField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_rule(mut self, rule: CrossFieldRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn rules(&self) -> &[CrossFieldRule] {
        &self.rules
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.field(name).is_some()
    }
}

/// Result of validating a whole form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct FormReport {
    pub is_valid: bool,
    /// Failing visible fields only.
    pub errors: BTreeMap<String, String>,
}

impl FormReport {
    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }
}

/// Evaluates a [`FormSchema`] against form states.
#[derive(Debug, Clone)]
pub struct FormValidationEngine {
    schema: FormSchema,
}

impl FormValidationEngine {
    pub fn new(schema: FormSchema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    /// Validate one field.
    ///
    /// Hidden fields are always valid. A required field with a blank value
    /// fails before its validator runs.
    pub fn validate_field(field: &FormField, state: &FormState) -> ValidationResult {
        if !field.is_visible(state) {
            return ValidationResult::Valid;
        }
        if field.is_required() && state.is_blank(field.name()) {
            return ValidationResult::invalid(format!("{} is required", field.label()));
        }
        field.run_validator(state.get(field.name()))
    }

    /// Validate every visible field, then every cross-field rule.
    ///
    /// A field's own error takes precedence over a rule's message for it.
    pub fn validate_form(&self, state: &FormState) -> FormReport {
        let mut errors = BTreeMap::new();

        for field in &self.schema.fields {
            if let ValidationResult::Invalid(message) = Self::validate_field(field, state) {
                errors.insert(field.name().to_string(), message);
            }
        }

        let visible = |name: &str| self.schema.field(name).map_or(true, |f| f.is_visible(state));
        for rule in &self.schema.rules {
            for violation in rule.evaluate(state, visible) {
                errors.entry(violation.field).or_insert(violation.message);
            }
        }

        debug!(fields = self.schema.fields.len(), errors = errors.len(), "Validated form");

        FormReport {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// Fields visible in `state`, in declaration order.
    pub fn visible_fields<'a>(
        &'a self,
        state: &'a FormState,
    ) -> impl Iterator<Item = &'a FormField> + 'a {
        self.schema.fields.iter().filter(move |f| f.is_visible(state))
    }

    /// Clear every field that was visible in `previous` but is hidden in
    /// `current`, repeating until no further field flips.
    ///
    /// Returns the names of fields whose value was actually cleared.
    pub fn apply_resets(&self, previous: &FormState, current: &mut FormState) -> Vec<String> {
        let mut reset = Vec::new();

        // Each pass either clears at least one value or stops.
        for _ in 0..=self.schema.fields.len() {
            let mut changed = false;
            for field in self.schema.fields.iter().filter(|f| f.is_conditional()) {
                if field.is_visible(previous)
                    && !field.is_visible(current)
                    && !current.get(field.name()).is_empty()
                {
                    current.set(field.name(), "");
                    reset.push(field.name().to_string());
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }

        if !reset.is_empty() {
            debug!(fields = ?reset, "Reset hidden fields");
        }
        reset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validators;

    fn marital_schema() -> FormSchema {
        FormSchema::new()
            .with_field(FormField::new("marital_status", "Marital Status").required())
            .with_field(
                FormField::new("spouse_name", "Spouse Name")
                    .required()
                    .visible_when_equals("marital_status", "married"),
            )
    }

    #[test]
    fn test_required_message_uses_label() {
        let field = FormField::new("full_name", "Full Name").required();
        let state = FormState::new().with("full_name", "  ");
        let result = FormValidationEngine::validate_field(&field, &state);
        assert_eq!(result, ValidationResult::invalid("Full Name is required"));
    }

    #[test]
    fn test_required_checked_before_validator() {
        let field = FormField::new("email", "Email")
            .required()
            .with_validator(validators::email());
        let result = FormValidationEngine::validate_field(&field, &FormState::new());
        assert_eq!(result.message(), Some("Email is required"));

        let state = FormState::new().with("email", "nope");
        let result = FormValidationEngine::validate_field(&field, &state);
        assert_eq!(result.message(), Some("Enter a valid email address"));
    }

    #[test]
    fn test_hidden_field_is_inert() {
        let engine = FormValidationEngine::new(marital_schema());
        let state = FormState::new().with("marital_status", "single");

        let report = engine.validate_form(&state);
        assert!(report.is_valid);
        assert!(report.error("spouse_name").is_none());

        let state = FormState::new().with("marital_status", "married");
        let report = engine.validate_form(&state);
        assert!(!report.is_valid);
        assert_eq!(report.error("spouse_name"), Some("Spouse Name is required"));
    }

    #[test]
    fn test_field_error_wins_over_rule() {
        let schema = FormSchema::new()
            .with_field(FormField::new("a", "A").with_validator(validators::min_length(5)))
            .with_field(FormField::new("b", "B"))
            .with_rule(CrossFieldRule::no_duplicate("a", "b", "Must differ"));
        let engine = FormValidationEngine::new(schema);

        let report = engine.validate_form(&FormState::new().with("a", "abc").with("b", "abc"));
        assert_eq!(report.error("a"), Some("Must be at least 5 characters"));
        assert_eq!(report.error("b"), Some("Must differ"));
    }

    #[test]
    fn test_chained_resets() {
        let schema = FormSchema::new()
            .with_field(FormField::new("has_vehicle", "Has Vehicle"))
            .with_field(
                FormField::new("vehicle_type", "Vehicle Type")
                    .visible_when_equals("has_vehicle", "yes"),
            )
            .with_field(
                FormField::new("licence_no", "Licence No")
                    .visible_when_equals("vehicle_type", "car"),
            );
        let engine = FormValidationEngine::new(schema);

        let previous = FormState::new()
            .with("has_vehicle", "yes")
            .with("vehicle_type", "car")
            .with("licence_no", "MH-01");
        let mut current = previous.clone().with("has_vehicle", "no");

        let reset = engine.apply_resets(&previous, &mut current);
        assert_eq!(reset, vec!["vehicle_type".to_string(), "licence_no".to_string()]);
        assert_eq!(current.get("licence_no"), "");
    }

    #[test]
    fn test_report_shape() {
        let engine = FormValidationEngine::new(marital_schema());
        let report = engine.validate_form(&FormState::new());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["isValid"], serde_json::json!(false));
        assert_eq!(
            json["errors"]["marital_status"],
            serde_json::json!("Marital Status is required")
        );
    }
}
