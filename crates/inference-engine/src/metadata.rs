//! Sidecar model metadata
//!
//! The training pipeline exports a small JSON file next to the ONNX graph
//! with the exact column order it trained on and the categorical vocabulary
//! for `vehicle_id`. Loading cross-checks it against the serving schema.

use crate::ModelLoadError;
use feature_engine::EXPECTED_COLUMNS;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Training-time schema description shipped with the artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Feature columns in training order
    pub columns: Vec<String>,
    /// Vehicle id levels seen during training, in encoding order
    pub vehicle_categories: Vec<String>,
}

impl ModelMetadata {
    /// Read and parse the sidecar file
    pub fn from_path(path: &Path) -> Result<Self, ModelLoadError> {
        let text = fs::read_to_string(path).map_err(|e| ModelLoadError::Metadata {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let meta: Self = serde_json::from_str(&text).map_err(|e| ModelLoadError::Metadata {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        debug!(
            columns = meta.columns.len(),
            vehicles = meta.vehicle_categories.len(),
            "parsed model metadata"
        );
        Ok(meta)
    }

    /// Metadata for the mock backend: the serving schema and a tiny
    /// vehicle vocabulary covering the form defaults.
    pub fn mock() -> Self {
        Self {
            columns: EXPECTED_COLUMNS.iter().map(|c| (*c).to_string()).collect(),
            vehicle_categories: vec!["1".to_string(), "2".to_string(), "3".to_string()],
        }
    }

    /// Check the artifact's declared columns against the serving schema.
    /// Names, order, and count must all agree.
    pub fn validate_schema(&self) -> Result<(), ModelLoadError> {
        if self.columns.len() != EXPECTED_COLUMNS.len()
            || !self.columns.iter().map(String::as_str).eq(EXPECTED_COLUMNS)
        {
            return Err(ModelLoadError::SchemaMismatch {
                expected: EXPECTED_COLUMNS.iter().map(|c| (*c).to_string()).collect(),
                actual: self.columns.clone(),
            });
        }
        Ok(())
    }

    /// Ordinal encoding of a vehicle id, as used during training
    pub fn vehicle_index(&self, vehicle_id: &str) -> Option<usize> {
        self.vehicle_categories
            .iter()
            .position(|c| c == vehicle_id)
    }
}
