//! Validation Error Types

use thiserror::Error;

/// Errors during trip input validation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Value below the allowed minimum
    #[error("{field} value {value} is below the minimum {min}")]
    BelowMinimum {
        field: &'static str,
        value: f64,
        min: f64,
    },

    /// Value above the allowed maximum
    #[error("{field} value {value} is above the maximum {max}")]
    AboveMaximum {
        field: &'static str,
        value: f64,
        max: f64,
    },

    /// Required field is empty
    #[error("required field is empty: {0}")]
    EmptyField(&'static str),

    /// Value is NaN or infinite
    #[error("{0} must be a finite number")]
    NotFinite(&'static str),
}
