//! Health check endpoint.

use std::sync::Arc;
use std::time::Instant;

use axum::{Extension, Json};
use serde::Serialize;

use crate::hub::Hub;

/// Global start time for uptime calculation.
static START_TIME: std::sync::OnceLock<Instant> = std::sync::OnceLock::new();

/// Initialize the start time (call once at startup).
pub fn init_start_time() {
    START_TIME.get_or_init(Instant::now);
}

/// Health status response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    /// Overall status.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Uptime in seconds.
    pub uptime_seconds: u64,
    /// Live devices after eviction.
    pub connected_devices: usize,
    /// Current alert count.
    pub alerts: u64,
}

/// Health check handler.
pub async fn health_handler(Extension(hub): Extension<Arc<Hub>>) -> Json<HealthStatus> {
    let uptime = START_TIME
        .get()
        .map(|start| start.elapsed().as_secs())
        .unwrap_or(0);

    Json(HealthStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: uptime,
        connected_devices: hub.device_count().await,
        alerts: hub.alert_count().await,
    })
}
