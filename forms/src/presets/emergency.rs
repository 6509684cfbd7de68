//! Emergency contact form.

use crate::engine::FormSchema;
use crate::field::FormField;
use crate::rules::{digits_only, CrossFieldRule};
use crate::validation::validators;

/// Emergency contact with two numbers that must differ.
pub fn emergency_contact() -> FormSchema {
    FormSchema::new()
        .with_field(FormField::new("contact_name", "Contact Name").required())
        .with_field(FormField::new("relationship", "Relationship").required())
        .with_field(
            FormField::new("primary_phone", "Primary Phone")
                .required()
                .with_validator(validators::phone()),
        )
        .with_field(
            FormField::new("secondary_phone", "Secondary Phone")
                .with_validator(validators::phone()),
        )
        .with_field(
            FormField::new("address", "Address").with_validator(validators::max_length(250)),
        )
        .with_rule(
            CrossFieldRule::no_duplicate(
                "primary_phone",
                "secondary_phone",
                "Primary and secondary contact numbers must be different",
            )
            .normalized_with(digits_only),
        )
}
