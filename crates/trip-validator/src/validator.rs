//! Trip parameter range checking

use crate::error::ValidationError;
use feature_engine::TripInput;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Validation rules for trip parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationRules {
    /// Minimum lap number
    pub lap_min: u32,
    /// Minimum average speed (km/h), must stay > 0 for the log transform
    pub speed_min: f64,
    /// Maximum average speed (km/h), sanity bound
    pub speed_max: f64,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            lap_min: 1,
            speed_min: 0.1,
            speed_max: 400.0,
        }
    }
}

/// Result of validating a full trip input
#[derive(Debug, Clone)]
pub struct ValidationReport {
    /// Whether all fields passed
    pub valid: bool,
    /// Every failure found, not just the first
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    /// First failure, if any
    pub fn first_error(&self) -> Option<&ValidationError> {
        self.errors.first()
    }
}

/// Validator for raw trip parameters
pub struct TripValidator {
    rules: ValidationRules,
}

impl TripValidator {
    /// Create a validator with the given rules
    pub fn new(rules: ValidationRules) -> Self {
        Self { rules }
    }

    /// Validate the vehicle identifier
    pub fn validate_vehicle_id(&self, vehicle_id: &str) -> Result<(), ValidationError> {
        if vehicle_id.trim().is_empty() {
            return Err(ValidationError::EmptyField("vehicle_id"));
        }
        Ok(())
    }

    /// Validate the lap number
    pub fn validate_lap(&self, lap: u32) -> Result<(), ValidationError> {
        if lap < self.rules.lap_min {
            return Err(ValidationError::BelowMinimum {
                field: "lap",
                value: f64::from(lap),
                min: f64::from(self.rules.lap_min),
            });
        }
        Ok(())
    }

    /// Validate the average speed
    pub fn validate_average_speed(&self, speed: f64) -> Result<(), ValidationError> {
        if !speed.is_finite() {
            return Err(ValidationError::NotFinite("average_speed"));
        }
        if speed < self.rules.speed_min {
            return Err(ValidationError::BelowMinimum {
                field: "average_speed",
                value: speed,
                min: self.rules.speed_min,
            });
        }
        if speed > self.rules.speed_max {
            return Err(ValidationError::AboveMaximum {
                field: "average_speed",
                value: speed,
                max: self.rules.speed_max,
            });
        }
        Ok(())
    }

    /// Validate a full trip input, collecting every failure
    pub fn validate(&self, input: &TripInput) -> ValidationReport {
        let mut errors = Vec::new();

        if let Err(e) = self.validate_vehicle_id(&input.vehicle_id) {
            errors.push(e);
        }
        if let Err(e) = self.validate_lap(input.lap) {
            errors.push(e);
        }
        if let Err(e) = self.validate_average_speed(input.average_speed) {
            errors.push(e);
        }

        debug!(errors = errors.len(), "validated trip input");

        ValidationReport {
            valid: errors.is_empty(),
            errors,
        }
    }
}

impl Default for TripValidator {
    fn default() -> Self {
        Self::new(ValidationRules::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn input(vehicle_id: &str, lap: u32, speed: f64) -> TripInput {
        TripInput {
            vehicle_id: vehicle_id.to_string(),
            lap,
            average_speed: speed,
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_form_defaults_pass() {
        let validator = TripValidator::default();
        let report = validator.validate(&input("1", 1, 40.0));
        assert!(report.valid);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_minimum_speed_passes() {
        let validator = TripValidator::default();
        assert!(validator.validate_average_speed(0.1).is_ok());
    }

    #[test]
    fn test_zero_and_negative_speed_rejected() {
        let validator = TripValidator::default();
        assert!(validator.validate_average_speed(0.0).is_err());
        assert!(validator.validate_average_speed(-5.0).is_err());
    }

    #[test]
    fn test_non_finite_speed_rejected() {
        let validator = TripValidator::default();
        assert_eq!(
            validator.validate_average_speed(f64::NAN),
            Err(ValidationError::NotFinite("average_speed"))
        );
        assert!(validator.validate_average_speed(f64::INFINITY).is_err());
    }

    #[test]
    fn test_lap_zero_rejected() {
        let validator = TripValidator::default();
        assert!(validator.validate_lap(0).is_err());
        assert!(validator.validate_lap(1).is_ok());
    }

    #[test]
    fn test_empty_vehicle_id_rejected() {
        let validator = TripValidator::default();
        assert!(validator.validate_vehicle_id("").is_err());
        assert!(validator.validate_vehicle_id("   ").is_err());
        assert!(validator.validate_vehicle_id("1").is_ok());
    }

    #[test]
    fn test_report_collects_all_failures() {
        let validator = TripValidator::default();
        let report = validator.validate(&input("", 0, 0.0));
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 3);
        assert_eq!(
            report.first_error(),
            Some(&ValidationError::EmptyField("vehicle_id"))
        );
    }
}
