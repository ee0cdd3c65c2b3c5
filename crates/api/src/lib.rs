//! Trip Duration Prediction API Server
//!
//! Serves the single-page prediction form and a small JSON API on top of
//! the feature transform and the cached model handle.

use axum::{
    extract::State,
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use inference_engine::TripPredictor;
use serde::Serialize;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod error;
mod settings;

pub mod routes;

pub use error::ApiError;
pub use settings::Settings;

/// Application state shared across handlers.
///
/// The predictor handle is loaded once at startup and shared read-only; no
/// interior mutability is needed.
pub struct AppState {
    /// Loaded model handle
    pub predictor: Arc<TripPredictor>,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create new application state around a loaded predictor
    pub fn new(predictor: Arc<TripPredictor>) -> Self {
        Self {
            predictor,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        }
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub model_loaded: bool,
    pub model_vehicles: usize,
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(form_handler))
        .route("/api/v1/predict", post(routes::predict::predict))
        .route("/api/v1/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve the embedded single-page form
async fn form_handler() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    // The state only ever holds a successfully loaded handle; a failed
    // load aborts startup before the router exists.
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        model_loaded: true,
        model_vehicles: state.predictor.metadata().vehicle_categories.len(),
    })
}

/// Initialize logging
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

/// Run the server
pub async fn run_server(
    addr: &str,
    predictor: Arc<TripPredictor>,
) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(AppState::new(predictor));
    let app = create_router(state);

    info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
