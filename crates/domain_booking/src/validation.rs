//! Validation of records before they are inserted
//!
//! Field rules are declared with `validator` on [`NewUser`] and
//! [`NewProperty`]. This module runs them and reduces the result to a single
//! [`BookingError`] naming the first offending field (alphabetically, so the
//! reported field does not depend on hash order).

use validator::{Validate, ValidationErrors};

use crate::error::BookingError;
use crate::property::NewProperty;
use crate::user::NewUser;

/// Entry point for pre-insert checks
pub struct BookingValidator;

impl BookingValidator {
    /// Checks that name, email and password are present and the email is well-formed
    pub fn validate_user(user: &NewUser) -> Result<(), BookingError> {
        user.validate().map_err(first_error)
    }

    /// Checks the fourteen property fields
    pub fn validate_property(property: &NewProperty) -> Result<(), BookingError> {
        property.validate().map_err(first_error)
    }
}

fn first_error(errors: ValidationErrors) -> BookingError {
    let field_errors = errors.field_errors();
    let mut fields: Vec<_> = field_errors.iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    match fields.first() {
        Some((field, errs)) => {
            let message = errs
                .first()
                .and_then(|e| e.message.as_ref().map(|m| m.to_string()))
                .unwrap_or_else(|| format!("{} is invalid", field));
            BookingError::invalid_field(field.to_string(), message)
        }
        None => BookingError::invalid_field("record", errors.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_user_passes() {
        let user = NewUser::new("Ada", "ada@example.com", "hash");
        assert!(BookingValidator::validate_user(&user).is_ok());
    }

    #[test]
    fn test_missing_name_reported() {
        let user = NewUser::new("", "ada@example.com", "hash");
        assert_eq!(
            BookingValidator::validate_user(&user),
            Err(BookingError::invalid_field("name", "name must not be empty"))
        );
    }

    #[test]
    fn test_first_field_is_alphabetical() {
        let user = NewUser::new("", "not-an-email", "");
        match BookingValidator::validate_user(&user) {
            Err(BookingError::InvalidField { field, .. }) => assert_eq!(field, "email"),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
