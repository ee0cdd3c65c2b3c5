//! Process-wide model cache
//!
//! Load-once semantics without an ambient global: the cache is owned by
//! whoever builds the application state and handed down by reference. The
//! first `get_or_load` reads disk; later calls clone the same handle. A
//! failed load caches nothing, so the next call retries from scratch.

use crate::predictor::{ModelConfig, TripPredictor};
use crate::ModelLoadError;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Identity-stable cache around [`TripPredictor::load`]
#[derive(Default)]
pub struct ModelCache {
    slot: Mutex<Option<Arc<TripPredictor>>>,
}

impl ModelCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached model, loading it on first use
    pub fn get_or_load(&self, config: &ModelConfig) -> Result<Arc<TripPredictor>, ModelLoadError> {
        let mut slot = self.slot.lock().expect("model cache lock poisoned");

        if let Some(model) = slot.as_ref() {
            debug!("reusing cached model handle");
            return Ok(Arc::clone(model));
        }

        let model = Arc::new(TripPredictor::load(config)?);
        *slot = Some(Arc::clone(&model));
        Ok(model)
    }

    /// Whether a model has been loaded and cached
    pub fn is_loaded(&self) -> bool {
        self.slot.lock().expect("model cache lock poisoned").is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn mock_config() -> ModelConfig {
        ModelConfig {
            mock: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_second_load_returns_same_instance() {
        let cache = ModelCache::new();
        let first = cache.get_or_load(&mock_config()).unwrap();
        let second = cache.get_or_load(&mock_config()).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_failed_load_caches_nothing() {
        let cache = ModelCache::new();
        let config = ModelConfig {
            model_path: PathBuf::from("/nonexistent/model.onnx"),
            metadata_path: PathBuf::from("/nonexistent/model.meta.json"),
            mock: false,
        };

        assert!(cache.get_or_load(&config).is_err());
        assert!(!cache.is_loaded());

        // a later load with a good config still works
        let model = cache.get_or_load(&mock_config()).unwrap();
        assert!(cache.is_loaded());
        drop(model);
    }
}
