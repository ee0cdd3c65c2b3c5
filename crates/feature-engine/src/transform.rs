//! Raw input to feature vector transform

use crate::input::TripInput;
use crate::schema::{ColumnSet, FeatureVector};
use chrono::{Datelike, Timelike};
use tracing::debug;

/// Base columns that get a `ln(1 + x)` companion column.
///
/// All of them are non-negative for valid input, so the logarithm argument
/// stays above 1 and the result is always finite.
pub const LOG_COLUMNS: [&str; 5] = ["lap", "day", "month", "average_speed", "hour"];

/// Derive the model-facing feature vector from raw trip parameters.
///
/// Pure and deterministic: no I/O, no clock reads, identical input yields a
/// bit-identical vector. Calendar and clock components are taken verbatim
/// from the supplied date and time, with no timezone conversion.
pub fn transform(input: &TripInput) -> FeatureVector {
    let mut columns = ColumnSet::new();

    columns.set_number("lap", f64::from(input.lap));
    columns.set_number("day", f64::from(input.date.day()));
    columns.set_number("month", f64::from(input.date.month()));
    columns.set_number("average_speed", input.average_speed);
    columns.set_number("hour", f64::from(input.time.hour()));
    columns.set_number("minute", f64::from(input.time.minute()));

    for base in LOG_COLUMNS {
        let value = columns.number(base).unwrap_or(0.0);
        columns.set_number(format!("{base}_log"), value.ln_1p());
    }

    columns.set_category("vehicle_id", input.vehicle_id.clone());

    debug!(
        vehicle_id = %input.vehicle_id,
        lap = input.lap,
        "derived {} columns",
        columns.len()
    );

    FeatureVector::reconcile(&columns)
}
