//! HTTP endpoints for hearth-hub.
//!
//! Provides the state and notify APIs plus health and metrics endpoints.

pub mod health;
mod metrics;
mod notify;
mod state;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};
use tower_http::cors::CorsLayer;

use crate::hub::Hub;

pub use health::HealthStatus;

/// Build the HTTP router with all endpoints.
///
/// CORS is wide open: the dashboard runs from arbitrary origins and the API
/// carries its own key-based authorization. The CORS layer also answers
/// preflight OPTIONS requests.
pub fn build_router(hub: Arc<Hub>) -> Router {
    Router::new()
        .route("/api/state", post(state::state_handler))
        .route("/api/notify", post(notify::notify_handler))
        .route("/health", get(health::health_handler))
        .route("/metrics", get(metrics::metrics_handler))
        .layer(CorsLayer::permissive())
        .layer(Extension(hub))
}
