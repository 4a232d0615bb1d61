//! Validation utilities.

use crate::{FieldError, FollowGraphError};
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the value and returns an `InvalidArgument` error on failure.
    fn validate_argument(&self) -> Result<(), FollowGraphError> {
        self.validate().map_err(validation_errors_to_follow_graph_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Flattens `validator::ValidationErrors` into field errors.
#[must_use]
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut field_errors: Vec<FieldError> = errors
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
        .collect();
    field_errors.sort_by(|a, b| a.field.cmp(&b.field));
    field_errors
}

/// Converts `validator::ValidationErrors` to `FollowGraphError::InvalidArgument`.
#[must_use]
pub fn validation_errors_to_follow_graph_error(errors: ValidationErrors) -> FollowGraphError {
    let message = field_errors(&errors)
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ");

    FollowGraphError::InvalidArgument(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Validate)]
    struct Probe {
        #[validate(length(min = 1, message = "must not be empty"))]
        name: String,
        #[validate(length(max = 4))]
        handle: String,
    }

    #[test]
    fn test_validate_argument_ok() {
        let probe = Probe {
            name: "a".to_string(),
            handle: "bob".to_string(),
        };
        assert!(probe.validate_argument().is_ok());
    }

    #[test]
    fn test_validate_argument_collects_fields() {
        let probe = Probe {
            name: String::new(),
            handle: "too long".to_string(),
        };
        let err = probe.validate_argument().unwrap_err();
        match err {
            FollowGraphError::InvalidArgument(message) => {
                assert!(message.contains("name: must not be empty"));
                assert!(message.contains("handle: length"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
