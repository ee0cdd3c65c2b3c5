//! Raw trip parameters as supplied by the caller

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Raw trip parameters for a single prediction request.
///
/// Range rules (`lap >= 1`, `average_speed > 0`) are enforced by the
/// `trip-validator` crate before the transform runs; the transform itself
/// does not re-validate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripInput {
    /// Vehicle identifier, categorical free text
    pub vehicle_id: String,
    /// Lap number, 1-based
    pub lap: u32,
    /// Average speed (km/h)
    pub average_speed: f64,
    /// Calendar date of the trip
    pub date: NaiveDate,
    /// Time of day of the trip
    pub time: NaiveTime,
}
