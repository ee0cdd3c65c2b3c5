//! Trip Duration Predictor - Main Entry Point

use api::{init_logging, run_server, Settings};
use inference_engine::ModelCache;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    info!("=== Trip Duration Predictor v{} ===", env!("CARGO_PKG_VERSION"));

    let settings = Settings::load()?;

    // A missing or corrupt artifact is fatal: refuse to start without a
    // usable model rather than serving garbage.
    let cache = ModelCache::new();
    let predictor = match cache.get_or_load(&settings.model) {
        Ok(predictor) => predictor,
        Err(e) => {
            error!("cannot start: {e}");
            return Err(e.into());
        }
    };

    run_server(&settings.bind_addr, predictor).await?;

    Ok(())
}
