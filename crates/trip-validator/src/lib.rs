//! Trip Input Validation
//!
//! Explicit range checking for raw trip parameters, independent of any UI
//! widget minimums. Out-of-range input is rejected, never clamped, so the
//! downstream log transform can assume a well-defined domain.

mod error;
mod validator;

pub use error::ValidationError;
pub use validator::{TripValidator, ValidationReport, ValidationRules};
