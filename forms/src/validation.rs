//! Validation results and the built-in validators.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Outcome of validating one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum ValidationResult {
    Valid,
    Invalid(String),
}

impl ValidationResult {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// The failure message, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Valid => None,
            Self::Invalid(message) => Some(message),
        }
    }
}

/// A per-field check over the raw text value.
pub type Validator = Arc<dyn Fn(&str) -> ValidationResult + Send + Sync>;

/// Built-in validators.
///
/// All of them accept an empty value; emptiness is the `required` flag's
/// concern.
pub mod validators {
    use super::{ValidationResult, Validator};
    use crate::error::Result;
    use chrono::{Local, NaiveDate};
    use regex::Regex;
    use std::sync::Arc;

    /// Wrap a closure as a [`Validator`].
    pub fn custom<F>(check: F) -> Validator
    where
        F: Fn(&str) -> ValidationResult + Send + Sync + 'static,
    {
        Arc::new(check)
    }

    /// Run validators in order, returning the first failure.
    pub fn all(validators: Vec<Validator>) -> Validator {
        Arc::new(move |value| {
            validators
                .iter()
                .map(|v| v(value))
                .find(|r| !r.is_valid())
                .unwrap_or(ValidationResult::Valid)
        })
    }

    const EMAIL_PATTERN: &str = concat!(
        r"^[A-Za-z0-9._%+-]+@",
        r"[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?",
        r"(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)*",
        r"\.[A-Za-z]{2,}$",
    );

    /// `local@domain.tld`: dot-separated, non-empty domain labels and an
    /// alphabetic top-level domain.
    pub fn email() -> Validator {
        let regex = Regex::new(EMAIL_PATTERN).ok();
        Arc::new(move |value| {
            let value = value.trim();
            let matched = regex.as_ref().is_some_and(|r| r.is_match(value));
            if value.is_empty() || matched {
                ValidationResult::Valid
            } else {
                ValidationResult::invalid("Enter a valid email address")
            }
        })
    }

    /// Optional leading `+` followed by 10 to 15 digits. Spaces, dashes and
    /// parentheses are ignored.
    pub fn phone() -> Validator {
        Arc::new(|value| {
            let value = value.trim();
            if value.is_empty() {
                return ValidationResult::Valid;
            }
            let body = value.strip_prefix('+').unwrap_or(value);
            let separators_ok = body
                .chars()
                .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')'));
            let digits = body.chars().filter(char::is_ascii_digit).count();
            if separators_ok && (10..=15).contains(&digits) {
                ValidationResult::Valid
            } else {
                ValidationResult::invalid("Enter a valid phone number")
            }
        })
    }

    pub fn min_length(min: usize) -> Validator {
        Arc::new(move |value| {
            let len = value.trim().chars().count();
            if len == 0 || len >= min {
                ValidationResult::Valid
            } else {
                ValidationResult::invalid(format!("Must be at least {} characters", min))
            }
        })
    }

    pub fn max_length(max: usize) -> Validator {
        Arc::new(move |value| {
            if value.trim().chars().count() <= max {
                ValidationResult::Valid
            } else {
                ValidationResult::invalid(format!("Must be at most {} characters", max))
            }
        })
    }

    /// Whole-value regular expression match.
    pub fn pattern(expression: &str, message: impl Into<String>) -> Result<Validator> {
        let regex = Regex::new(&format!("^(?:{})$", expression))?;
        let message = message.into();
        Ok(Arc::new(move |value| {
            let value = value.trim();
            if value.is_empty() || regex.is_match(value) {
                ValidationResult::Valid
            } else {
                ValidationResult::invalid(message.clone())
            }
        }))
    }

    /// Inclusive numeric range.
    pub fn range(min: f64, max: f64) -> Validator {
        Arc::new(move |value| {
            let value = value.trim();
            if value.is_empty() {
                return ValidationResult::Valid;
            }
            match value.parse::<f64>() {
                Ok(n) if n.is_finite() && n >= min && n <= max => ValidationResult::Valid,
                Ok(_) => ValidationResult::invalid(format!("Must be between {} and {}", min, max)),
                Err(_) => ValidationResult::invalid("Enter a number"),
            }
        })
    }

    /// ISO `YYYY-MM-DD` date no later than today (local time).
    pub fn date_not_in_future() -> Validator {
        Arc::new(|value| check_date(value, Local::now().date_naive()))
    }

    /// ISO `YYYY-MM-DD` date no later than `limit`.
    pub fn date_on_or_before(limit: NaiveDate) -> Validator {
        Arc::new(move |value| check_date(value, limit))
    }

    fn check_date(value: &str, limit: NaiveDate) -> ValidationResult {
        let value = value.trim();
        if value.is_empty() {
            return ValidationResult::Valid;
        }
        match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
            Ok(date) if date <= limit => ValidationResult::Valid,
            Ok(_) => ValidationResult::invalid("Date cannot be in the future"),
            Err(_) => ValidationResult::invalid("Enter a date as YYYY-MM-DD"),
        }
    }

    /// Value must be one of `options`.
    pub fn one_of(options: &[&str]) -> Validator {
        let options: Vec<String> = options.iter().map(|o| o.to_string()).collect();
        Arc::new(move |value| {
            let value = value.trim();
            if value.is_empty() || options.iter().any(|o| o == value) {
                ValidationResult::Valid
            } else {
                ValidationResult::invalid(format!("Choose one of: {}", options.join(", ")))
            }
        })
    }
}
