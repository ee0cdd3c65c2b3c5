//! Model loading and prediction

use crate::metadata::ModelMetadata;
use crate::{InferenceError, ModelLoadError};
use feature_engine::FeatureVector;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tract_onnx::prelude::*;
use tracing::{debug, info};

type RunnablePlan = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

/// Model artifact configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Path to the serialized ONNX graph
    pub model_path: PathBuf,
    /// Path to the sidecar metadata JSON
    pub metadata_path: PathBuf,
    /// Use the deterministic mock backend instead of the artifact
    pub mock: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("models/trip_duration.onnx"),
            metadata_path: PathBuf::from("models/trip_duration.meta.json"),
            mock: false,
        }
    }
}

#[derive(Debug)]
enum Backend {
    Onnx(RunnablePlan),
    Mock,
}

/// Loaded trip-duration model.
///
/// Constructed once at startup and shared read-only for the process
/// lifetime; `predict` takes `&self` and is reentrant, so concurrent
/// requests may use the same instance.
#[derive(Debug)]
pub struct TripPredictor {
    backend: Backend,
    metadata: ModelMetadata,
}

impl TripPredictor {
    /// Load the artifact described by `config`.
    ///
    /// Fails with [`ModelLoadError`] if the ONNX file or its metadata
    /// sidecar is missing, unreadable, or disagrees with the serving
    /// schema. Nothing is cached on failure.
    pub fn load(config: &ModelConfig) -> Result<Self, ModelLoadError> {
        if config.mock {
            info!("using mock inference backend");
            return Ok(Self::mock());
        }

        if !config.model_path.exists() {
            return Err(ModelLoadError::ArtifactMissing(config.model_path.clone()));
        }

        let metadata = ModelMetadata::from_path(&config.metadata_path)?;
        metadata.validate_schema()?;

        let width = metadata.columns.len();
        let plan = tract_onnx::onnx()
            .model_for_path(&config.model_path)
            .map_err(|e| ModelLoadError::Backend(e.to_string()))?
            .with_input_fact(0, InferenceFact::dt_shape(f32::datum_type(), tvec!(1, width)))
            .map_err(|e| ModelLoadError::Backend(e.to_string()))?
            .into_optimized()
            .map_err(|e| ModelLoadError::Backend(e.to_string()))?
            .into_runnable()
            .map_err(|e| ModelLoadError::Backend(e.to_string()))?;

        info!(
            model = %config.model_path.display(),
            columns = width,
            vehicles = metadata.vehicle_categories.len(),
            "model loaded"
        );

        Ok(Self {
            backend: Backend::Onnx(plan),
            metadata,
        })
    }

    /// Deterministic backend for development and tests; no artifact needed
    pub fn mock() -> Self {
        Self {
            backend: Backend::Mock,
            metadata: ModelMetadata::mock(),
        }
    }

    /// Schema metadata the loaded artifact was trained with
    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    /// Estimate total trip duration for a single feature vector.
    ///
    /// Synchronous, read-only, no retries: a failure is terminal for this
    /// request and the predictor stays usable.
    pub fn predict(&self, features: &FeatureVector) -> Result<f64, InferenceError> {
        let vehicle_code = self
            .metadata
            .vehicle_index(&features.vehicle_id)
            .ok_or_else(|| InferenceError::UnknownVehicle(features.vehicle_id.clone()))?;

        let numeric = features.numeric_values();
        let mut lanes: Vec<f32> = numeric.iter().map(|v| *v as f32).collect();
        lanes.push(vehicle_code as f32);

        let expected = self.metadata.columns.len();
        if lanes.len() != expected {
            return Err(InferenceError::WidthMismatch {
                expected,
                actual: lanes.len(),
            });
        }

        let estimate = match &self.backend {
            Backend::Mock => mock_estimate(features),
            Backend::Onnx(plan) => run_plan(plan, lanes, expected)?,
        };

        if !estimate.is_finite() {
            return Err(InferenceError::NonFinite);
        }

        debug!(vehicle_id = %features.vehicle_id, estimate, "prediction complete");
        Ok(estimate)
    }
}

fn run_plan(plan: &RunnablePlan, lanes: Vec<f32>, width: usize) -> Result<f64, InferenceError> {
    let input = tract_ndarray::Array2::<f32>::from_shape_vec((1, width), lanes)
        .map_err(|e| InferenceError::Backend(e.to_string()))?;

    let outputs = plan
        .run(tvec!(Tensor::from(input).into()))
        .map_err(|e| InferenceError::Backend(e.to_string()))?;

    let view = outputs[0]
        .to_array_view::<f32>()
        .map_err(|e| InferenceError::Backend(e.to_string()))?;

    view.iter()
        .next()
        .map(|v| f64::from(*v))
        .ok_or(InferenceError::EmptyOutput)
}

/// Closed-form stand-in estimate: a nominal 5 km lap at the given average
/// speed, in minutes, with a rush-hour surcharge.
fn mock_estimate(features: &FeatureVector) -> f64 {
    let distance_km = 5.0 * features.lap.max(1.0);
    let base_minutes = 60.0 * distance_km / features.average_speed.max(0.1);
    let hour = features.hour as u32;
    if (7..=9).contains(&hour) || (17..=19).contains(&hour) {
        base_minutes * 1.2
    } else {
        base_minutes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use feature_engine::{transform, TripInput};

    fn features(vehicle_id: &str, lap: u32, speed: f64, hour: u32) -> FeatureVector {
        transform(&TripInput {
            vehicle_id: vehicle_id.to_string(),
            lap,
            average_speed: speed,
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            time: NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
        })
    }

    #[test]
    fn test_mock_predict_is_finite_and_deterministic() {
        let predictor = TripPredictor::mock();
        let input = features("1", 1, 40.0, 12);

        let first = predictor.predict(&input).unwrap();
        let second = predictor.predict(&input).unwrap();
        assert!(first.is_finite());
        assert!(first > 0.0);
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn test_mock_rush_hour_costs_more() {
        let predictor = TripPredictor::mock();
        let off_peak = predictor.predict(&features("1", 1, 40.0, 12)).unwrap();
        let peak = predictor.predict(&features("1", 1, 40.0, 8)).unwrap();
        assert!(peak > off_peak);
    }

    #[test]
    fn test_unknown_vehicle_rejected() {
        let predictor = TripPredictor::mock();
        let err = predictor.predict(&features("zeppelin", 1, 40.0, 8)).unwrap_err();
        assert!(matches!(err, InferenceError::UnknownVehicle(id) if id == "zeppelin"));
    }

    #[test]
    fn test_predictor_recovers_after_failed_request() {
        let predictor = TripPredictor::mock();
        assert!(predictor.predict(&features("zeppelin", 1, 40.0, 8)).is_err());
        assert!(predictor.predict(&features("1", 1, 40.0, 8)).is_ok());
    }

    #[test]
    fn test_missing_artifact_is_load_error() {
        let config = ModelConfig {
            model_path: PathBuf::from("/nonexistent/trip_duration.onnx"),
            metadata_path: PathBuf::from("/nonexistent/trip_duration.meta.json"),
            mock: false,
        };
        let err = TripPredictor::load(&config).unwrap_err();
        assert!(matches!(err, ModelLoadError::ArtifactMissing(_)));
    }
}
