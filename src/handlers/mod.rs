//! HTTP request handlers for gemini-bridge

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::metrics::Metrics;
use crate::middleware::request_id_middleware;
use crate::upstream::GeminiClient;
use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod chat;
pub mod extractor;
pub mod metrics;
pub mod root;

/// Application state shared across all handlers
///
/// Everything inside is immutable after startup or internally synchronized,
/// so cloning per request is cheap.
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    client: GeminiClient,
    metrics: Arc<Metrics>,
}

impl AppState {
    /// Create a new AppState from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or the metrics registry cannot be built.
    pub fn new(config: Arc<Config>) -> AppResult<Self> {
        let client = GeminiClient::new(&config.gemini)?;
        let metrics = Metrics::new()
            .map_err(|e| AppError::Internal(format!("Failed to create metrics: {}", e)))?;

        Ok(Self {
            config,
            client,
            metrics: Arc::new(metrics),
        })
    }

    /// Get reference to the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get reference to the upstream client
    pub fn client(&self) -> &GeminiClient {
        &self.client
    }

    /// Get reference to the metrics collector
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }
}

/// Build the full application router
///
/// - `GET /` liveness text
/// - `POST /api/chat` chat completion bridge
/// - `GET /metrics` Prometheus exposition
///
/// CORS is permissive; every response carries an `x-request-id` header.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root::handler))
        .route("/api/chat", post(chat::handler))
        .route("/metrics", get(metrics::handler))
        .with_state(state)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
