//! Service configuration
//!
//! Layered settings: optional TOML file under `config/`, overridden by
//! `TRIP_`-prefixed environment variables (e.g. `TRIP_MODEL__MOCK=true`).

use inference_engine::ModelConfig;
use serde::Deserialize;

/// Server and model settings
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Socket address to bind
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Model artifact configuration
    #[serde(default)]
    pub model: ModelConfig,
}

fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

impl Settings {
    /// Load settings from file and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name("config/trip-predictor").required(false))
            .add_source(
                config::Environment::with_prefix("TRIP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            model: ModelConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.bind_addr, "0.0.0.0:8080");
        assert!(!settings.model.mock);
        assert!(settings.model.model_path.ends_with("trip_duration.onnx"));
    }
}
