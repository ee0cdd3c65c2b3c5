//! Model-facing feature schema and reconciliation

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// Number of columns in the model schema
pub const FEATURE_DIMENSION: usize = 12;

/// Column names in the exact order the trained model expects.
///
/// `minute` carries no log companion; the training pipeline left it raw and
/// the serving schema must mirror that exactly.
pub const EXPECTED_COLUMNS: [&str; FEATURE_DIMENSION] = [
    "lap",
    "day",
    "month",
    "average_speed",
    "hour",
    "minute",
    "lap_log",
    "day_log",
    "month_log",
    "average_speed_log",
    "hour_log",
    "vehicle_id",
];

/// A single derived column value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColumnValue {
    /// Numeric lane
    Number(f64),
    /// Categorical lane (vehicle id)
    Category(String),
}

/// Named intermediate record produced by the transform, before projection
/// onto the fixed model schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnSet {
    columns: BTreeMap<String, ColumnValue>,
}

impl ColumnSet {
    /// Create an empty column set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a numeric column
    pub fn set_number(&mut self, name: impl Into<String>, value: f64) {
        self.columns.insert(name.into(), ColumnValue::Number(value));
    }

    /// Set a categorical column
    pub fn set_category(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.columns
            .insert(name.into(), ColumnValue::Category(value.into()));
    }

    /// Get a numeric column, if present and numeric
    pub fn number(&self, name: &str) -> Option<f64> {
        match self.columns.get(name) {
            Some(ColumnValue::Number(v)) => Some(*v),
            _ => None,
        }
    }

    /// Get a categorical column, if present and categorical
    pub fn category(&self, name: &str) -> Option<&str> {
        match self.columns.get(name) {
            Some(ColumnValue::Category(v)) => Some(v.as_str()),
            _ => None,
        }
    }

    /// Number of named columns currently held
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the set holds no columns
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Names present in this set but absent from the model schema
    pub fn extra_columns(&self) -> Vec<&str> {
        self.columns
            .keys()
            .filter(|name| !EXPECTED_COLUMNS.contains(&name.as_str()))
            .map(String::as_str)
            .collect()
    }
}

/// Fixed-schema record consumed by the trained model.
///
/// Field order mirrors [`EXPECTED_COLUMNS`]. Built fresh per prediction,
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub lap: f64,
    pub day: f64,
    pub month: f64,
    pub average_speed: f64,
    pub hour: f64,
    pub minute: f64,
    pub lap_log: f64,
    pub day_log: f64,
    pub month_log: f64,
    pub average_speed_log: f64,
    pub hour_log: f64,
    pub vehicle_id: String,
}

impl FeatureVector {
    /// Project a named column set onto the fixed model schema.
    ///
    /// Missing numeric columns default to 0.0 and a missing vehicle id to
    /// the empty category; columns outside the schema are dropped. The
    /// zero-default keeps partial inputs deterministic instead of failing
    /// mid-transform; the inference layer still rejects an empty category.
    pub fn reconcile(columns: &ColumnSet) -> Self {
        let extra = columns.extra_columns();
        if !extra.is_empty() {
            warn!("dropping columns outside the model schema: {:?}", extra);
        }

        let number = |name: &str| columns.number(name).unwrap_or(0.0);

        Self {
            lap: number("lap"),
            day: number("day"),
            month: number("month"),
            average_speed: number("average_speed"),
            hour: number("hour"),
            minute: number("minute"),
            lap_log: number("lap_log"),
            day_log: number("day_log"),
            month_log: number("month_log"),
            average_speed_log: number("average_speed_log"),
            hour_log: number("hour_log"),
            vehicle_id: columns.category("vehicle_id").unwrap_or_default().to_string(),
        }
    }

    /// Numeric lanes in schema order (everything except the trailing
    /// categorical `vehicle_id`).
    pub fn numeric_values(&self) -> [f64; FEATURE_DIMENSION - 1] {
        [
            self.lap,
            self.day,
            self.month,
            self.average_speed,
            self.hour,
            self.minute,
            self.lap_log,
            self.day_log,
            self.month_log,
            self.average_speed_log,
            self.hour_log,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_has_twelve_columns() {
        assert_eq!(EXPECTED_COLUMNS.len(), FEATURE_DIMENSION);
        assert_eq!(EXPECTED_COLUMNS[0], "lap");
        assert_eq!(EXPECTED_COLUMNS[5], "minute");
        assert_eq!(EXPECTED_COLUMNS[11], "vehicle_id");
    }

    #[test]
    fn test_reconcile_defaults_missing_columns_to_zero() {
        let mut columns = ColumnSet::new();
        columns.set_number("lap", 4.0);
        columns.set_category("vehicle_id", "9");

        let vector = FeatureVector::reconcile(&columns);
        assert_eq!(vector.lap, 4.0);
        assert_eq!(vector.day, 0.0);
        assert_eq!(vector.month, 0.0);
        assert_eq!(vector.hour_log, 0.0);
        assert_eq!(vector.vehicle_id, "9");
    }

    #[test]
    fn test_reconcile_empty_set_is_all_zeros() {
        let vector = FeatureVector::reconcile(&ColumnSet::new());
        assert_eq!(vector.numeric_values(), [0.0; 11]);
        assert_eq!(vector.vehicle_id, "");
    }

    #[test]
    fn test_reconcile_drops_extra_columns() {
        let mut columns = ColumnSet::new();
        columns.set_number("lap", 1.0);
        columns.set_number("tyre_pressure", 32.0);
        columns.set_category("vehicle_id", "1");

        assert_eq!(columns.extra_columns(), vec!["tyre_pressure"]);

        let vector = FeatureVector::reconcile(&columns);
        let json = serde_json::to_string(&vector).unwrap();
        assert!(!json.contains("tyre_pressure"));
    }

    #[test]
    fn test_numeric_values_follow_schema_order() {
        let mut columns = ColumnSet::new();
        for (i, name) in EXPECTED_COLUMNS.iter().take(11).enumerate() {
            columns.set_number(*name, i as f64);
        }
        columns.set_category("vehicle_id", "1");

        let vector = FeatureVector::reconcile(&columns);
        let values = vector.numeric_values();
        for (i, v) in values.iter().enumerate() {
            assert_eq!(*v, i as f64);
        }
    }
}
