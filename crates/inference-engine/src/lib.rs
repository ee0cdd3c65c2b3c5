//! Trip Duration Inference
//!
//! Loads the trained regression artifact (ONNX graph plus a sidecar metadata
//! file pinning the training-time schema) exactly once per process and runs
//! single-row predictions against it. The feature schema contract with
//! `feature-engine` is enforced at load and at every predict call so that a
//! drift between training and serving fails loudly.

mod cache;
mod metadata;
mod predictor;

pub use cache::ModelCache;
pub use metadata::ModelMetadata;
pub use predictor::{ModelConfig, TripPredictor};

use std::path::PathBuf;
use thiserror::Error;

/// Errors while loading the model artifact. Fatal at startup: the process
/// refuses to serve without a usable model.
#[derive(Debug, Error)]
pub enum ModelLoadError {
    #[error("model artifact not found at {0}")]
    ArtifactMissing(PathBuf),
    #[error("failed to read model metadata at {path}: {reason}")]
    Metadata { path: PathBuf, reason: String },
    #[error("artifact schema does not match the serving schema: expected {expected:?}, artifact declares {actual:?}")]
    SchemaMismatch {
        expected: Vec<String>,
        actual: Vec<String>,
    },
    #[error("model load failed: {0}")]
    Backend(String),
}

/// Errors during a single prediction. Recovered at the request boundary;
/// the process keeps serving afterwards.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("feature width mismatch: model expects {expected} columns, got {actual}")]
    WidthMismatch { expected: usize, actual: usize },
    #[error("unknown vehicle id {0:?}: not in the training vocabulary")]
    UnknownVehicle(String),
    #[error("model produced a non-finite estimate")]
    NonFinite,
    #[error("model produced no output")]
    EmptyOutput,
    #[error("inference failed: {0}")]
    Backend(String),
}
