//! Prediction Route

use axum::{extract::State, Json};
use feature_engine::{transform, TripInput};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;
use trip_validator::TripValidator;

use crate::{ApiError, AppState};

/// Response for a successful prediction
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    /// Estimated total trip duration (model units, minutes)
    pub estimated_time: f64,
    /// Echo of the requested average speed (km/h)
    pub average_speed: f64,
}

/// Run one transform + predict cycle for a trip input.
///
/// Validation happens here, at the request boundary, so the transform can
/// stay pure and unchecked. Any failure becomes a JSON error response; the
/// server keeps handling subsequent requests.
pub async fn predict(
    State(state): State<Arc<AppState>>,
    Json(input): Json<TripInput>,
) -> Result<Json<PredictResponse>, ApiError> {
    let report = TripValidator::default().validate(&input);
    if !report.valid {
        return Err(ApiError::from(report.errors));
    }

    let features = transform(&input);
    let estimated_time = state.predictor.predict(&features)?;

    info!(
        vehicle_id = %input.vehicle_id,
        lap = input.lap,
        estimated_time,
        "prediction served"
    );

    Ok(Json(PredictResponse {
        estimated_time,
        average_speed: input.average_speed,
    }))
}
