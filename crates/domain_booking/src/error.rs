//! Booking domain errors

use core_kernel::PortError;
use thiserror::Error;

/// Errors raised by the booking domain before storage is touched
#[derive(Debug, Error, PartialEq)]
pub enum BookingError {
    /// A field of a new record failed validation
    #[error("Invalid {field}: {message}")]
    InvalidField {
        field: String,
        message: String,
    },
}

impl BookingError {
    /// Creates an InvalidField error
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        BookingError::InvalidField {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<BookingError> for PortError {
    fn from(error: BookingError) -> Self {
        match error {
            BookingError::InvalidField { field, message } => {
                PortError::validation_field(message, field)
            }
        }
    }
}
