//! Daily work log form.

use chrono::NaiveTime;

use crate::engine::FormSchema;
use crate::field::FormField;
use crate::rules::CrossFieldRule;
use crate::validation::{validators, ValidationResult};

fn time_of_day() -> crate::validation::Validator {
    validators::custom(|value| {
        let value = value.trim();
        if value.is_empty() || parse_time(value).is_some() {
            ValidationResult::Valid
        } else {
            ValidationResult::invalid("Enter a time as HH:MM")
        }
    })
}

fn parse_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").ok()
}

/// Daily work log entry.
pub fn daily_work() -> FormSchema {
    FormSchema::new()
        .with_field(
            FormField::new("work_date", "Date")
                .required()
                .with_validator(validators::date_not_in_future()),
        )
        .with_field(FormField::new("project", "Project").required())
        .with_field(
            FormField::new("hours", "Hours")
                .required()
                .with_validator(validators::range(0.0, 24.0)),
        )
        .with_field(FormField::new("start_time", "Start Time").with_validator(time_of_day()))
        .with_field(FormField::new("end_time", "End Time").with_validator(time_of_day()))
        .with_field(
            FormField::new("description", "Description")
                .required()
                .with_validator(validators::min_length(10)),
        )
        .with_rule(CrossFieldRule::custom(
            "end_after_start",
            &["start_time", "end_time"],
            |state| {
                let start = parse_time(state.get("start_time"))?;
                let end = parse_time(state.get("end_time"))?;
                (end <= start).then(|| "End time must be after start time".to_string())
            },
        ))
}
