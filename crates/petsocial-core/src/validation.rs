//! Validation utilities.

use crate::{FieldError, PetsocialError};
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns a `PetsocialError` on failure.
    fn validate_request(&self) -> Result<(), PetsocialError> {
        self.validate().map_err(validation_errors_to_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Flattens `validator::ValidationErrors` into field errors.
#[must_use]
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: (*field).to_string(),
                message: error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), |m| m.to_string()),
                code: error.code.to_string(),
            })
        })
        .collect()
}

/// Converts `validator::ValidationErrors` to `PetsocialError`.
#[must_use]
pub fn validation_errors_to_error(errors: ValidationErrors) -> PetsocialError {
    let mut fields = field_errors(&errors);
    fields.sort_by(|a, b| a.field.cmp(&b.field));

    let message = fields
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ");

    PetsocialError::Validation(message)
}

/// Trims a required name, rejecting blank input.
pub fn required_name(value: &str, label: &str) -> Result<String, PetsocialError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(PetsocialError::validation(format!("{} name is required.", capitalize(label))));
    }
    Ok(trimmed.to_string())
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
