//! Form-level rules that need sibling values.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::state::FormState;

/// A field flagged by a cross-field rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleViolation {
    pub field: String,
    pub message: String,
}

type Normalizer = fn(&str) -> String;
type RuleCheck = Arc<dyn Fn(&FormState) -> Option<String> + Send + Sync>;

#[derive(Clone)]
enum RuleKind {
    NoDuplicate {
        first: String,
        second: String,
        normalize: Normalizer,
    },
    Custom(RuleCheck),
}

/// A rule evaluated over the whole form.
///
/// When the rule fails every member field is flagged with its message. A rule
/// with a hidden member is skipped.
#[derive(Clone)]
pub struct CrossFieldRule {
    name: String,
    fields: Vec<String>,
    message: String,
    kind: RuleKind,
}

impl CrossFieldRule {
    /// Both fields flagged when both are non-empty and equal after trimming.
    pub fn no_duplicate(first: &str, second: &str, message: impl Into<String>) -> Self {
        Self {
            name: format!("no_duplicate:{}:{}", first, second),
            fields: vec![first.to_string(), second.to_string()],
            message: message.into(),
            kind: RuleKind::NoDuplicate {
                first: first.to_string(),
                second: second.to_string(),
                normalize: trimmed,
            },
        }
    }

    /// Compare values through `normalize` instead of plain trimming.
    pub fn normalized_with(mut self, normalize: Normalizer) -> Self {
        if let RuleKind::NoDuplicate { normalize: n, .. } = &mut self.kind {
            *n = normalize;
        }
        self
    }

    /// Arbitrary check over `fields`; returning `Some(message)` flags them all.
    pub fn custom<F>(name: impl Into<String>, fields: &[&str], check: F) -> Self
    where
        F: Fn(&FormState) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            fields: fields.iter().map(|f| f.to_string()).collect(),
            message: String::new(),
            kind: RuleKind::Custom(Arc::new(check)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Member fields, in declaration order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Evaluate against `state`. `visible` reports current field visibility.
    pub fn evaluate<V>(&self, state: &FormState, visible: V) -> Vec<RuleViolation>
    where
        V: Fn(&str) -> bool,
    {
        if !self.fields.iter().all(|f| visible(f.as_str())) {
            return Vec::new();
        }

        let failure = match &self.kind {
            RuleKind::NoDuplicate {
                first,
                second,
                normalize,
            } => {
                let a = normalize(state.get(first));
                let b = normalize(state.get(second));
                (!a.is_empty() && a == b).then(|| self.message.clone())
            }
            RuleKind::Custom(check) => check(state),
        };

        match failure {
            Some(message) => self
                .fields
                .iter()
                .map(|field| RuleViolation {
                    field: field.clone(),
                    message: message.clone(),
                })
                .collect(),
            None => Vec::new(),
        }
    }
}

impl fmt::Debug for CrossFieldRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrossFieldRule")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .finish()
    }
}

fn trimmed(value: &str) -> String {
    value.trim().to_string()
}

/// Digits only, so `+91 98765-43210` and `+919876543210` compare equal.
pub fn digits_only(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phones(primary: &str, secondary: &str) -> FormState {
        FormState::new()
            .with("primary_phone", primary)
            .with("secondary_phone", secondary)
    }

    fn phone_rule() -> CrossFieldRule {
        CrossFieldRule::no_duplicate("primary_phone", "secondary_phone", "Duplicate contact")
    }

    #[test]
    fn test_equal_values_flag_both() {
        let rule = phone_rule();
        let violations = rule.evaluate(&phones("+919876543210", "+919876543210"), |_| true);
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].field, "primary_phone");
        assert_eq!(violations[1].field, "secondary_phone");
        assert_eq!(violations[1].message, "Duplicate contact");
    }

    #[test]
    fn test_empty_values_never_duplicate() {
        let rule = phone_rule();
        assert!(rule.evaluate(&phones("", ""), |_| true).is_empty());
        assert!(rule.evaluate(&phones("  ", "  "), |_| true).is_empty());
    }

    #[test]
    fn test_normalizer() {
        let rule = phone_rule();
        let state = phones("+91 98765-43210", "+919876543210");
        assert!(rule.evaluate(&state, |_| true).is_empty());

        let rule = rule.normalized_with(digits_only);
        assert_eq!(rule.evaluate(&state, |_| true).len(), 2);
    }

    #[test]
    fn test_hidden_member_skips_rule() {
        let rule = phone_rule();
        let state = phones("+919876543210", "+919876543210");
        assert!(rule.evaluate(&state, |f| f != "secondary_phone").is_empty());
    }

    #[test]
    fn test_custom_rule() {
        let rule = CrossFieldRule::custom("budget", &["min", "max"], |state| {
            let min: i64 = state.get("min").parse().ok()?;
            let max: i64 = state.get("max").parse().ok()?;
            (min > max).then(|| "Minimum exceeds maximum".to_string())
        });
        let state = FormState::new().with("min", "10").with("max", "5");
        let violations = rule.evaluate(&state, |_| true);
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].message, "Minimum exceeds maximum");
    }
}
