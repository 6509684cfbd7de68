//! Personal information form.

use crate::engine::FormSchema;
use crate::field::FormField;
use crate::validation::validators;

pub const MARITAL_STATUSES: &[&str] = &["single", "married", "divorced", "widowed"];

/// Employee personal details. Spouse fields only apply while married.
pub fn personal_information() -> FormSchema {
    FormSchema::new()
        .with_field(
            FormField::new("full_name", "Full Name")
                .required()
                .with_validator(validators::all(vec![
                    validators::min_length(2),
                    validators::max_length(100),
                ])),
        )
        .with_field(
            FormField::new("email", "Email")
                .required()
                .with_validator(validators::email()),
        )
        .with_field(FormField::new("phone", "Phone").with_validator(validators::phone()))
        .with_field(
            FormField::new("date_of_birth", "Date of Birth")
                .with_validator(validators::date_not_in_future()),
        )
        .with_field(
            FormField::new("marital_status", "Marital Status")
                .required()
                .with_validator(validators::one_of(MARITAL_STATUSES)),
        )
        .with_field(
            FormField::new("spouse_name", "Spouse Name")
                .required()
                .visible_when_equals("marital_status", "married"),
        )
        .with_field(
            FormField::new("anniversary_date", "Anniversary Date")
                .with_validator(validators::date_not_in_future())
                .visible_when_equals("marital_status", "married"),
        )
}
