//! Prometheus metrics endpoint.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::{http::header::CONTENT_TYPE, response::IntoResponse, Extension};

use crate::hub::Hub;

/// Prometheus metrics handler.
///
/// Emits the hub gauges and per-operation counters in Prometheus text
/// format.
pub async fn metrics_handler(Extension(hub): Extension<Arc<Hub>>) -> impl IntoResponse {
    let m = hub.metrics();

    // Gauges reflect current state, counters are monotonic since startup.
    let connected_devices = hub.device_count().await;
    let alerts = hub.alert_count().await;

    let reads = m.reads_total.load(Ordering::Relaxed);
    let updates = m.updates_total.load(Ordering::Relaxed);
    let registered = m.alerts_registered_total.load(Ordering::Relaxed);
    let default_queries = m.default_queries_total.load(Ordering::Relaxed);
    let unauthorized = m.unauthorized_total.load(Ordering::Relaxed);
    let notify_sent = m.notify_sent_total.load(Ordering::Relaxed);
    let notify_simulated = m.notify_simulated_total.load(Ordering::Relaxed);

    let body = format!(
        r#"# HELP hearth_hub_connected_devices Live devices after eviction
# TYPE hearth_hub_connected_devices gauge
hearth_hub_connected_devices {connected_devices}

# HELP hearth_hub_alerts Current alert count
# TYPE hearth_hub_alerts gauge
hearth_hub_alerts {alerts}

# HELP hearth_hub_info Server information
# TYPE hearth_hub_info gauge
hearth_hub_info{{version="{version}"}} 1

# HELP hearth_hub_state_reads_total Total get_state reads served
# TYPE hearth_hub_state_reads_total counter
hearth_hub_state_reads_total {reads}

# HELP hearth_hub_state_updates_total Total accepted update_state writes
# TYPE hearth_hub_state_updates_total counter
hearth_hub_state_updates_total {updates}

# HELP hearth_hub_alerts_registered_total Total manual alert registrations
# TYPE hearth_hub_alerts_registered_total counter
hearth_hub_alerts_registered_total {registered}

# HELP hearth_hub_default_queries_total Total default no-op queries served
# TYPE hearth_hub_default_queries_total counter
hearth_hub_default_queries_total {default_queries}

# HELP hearth_hub_unauthorized_total Total requests rejected for a bad admin key
# TYPE hearth_hub_unauthorized_total counter
hearth_hub_unauthorized_total {unauthorized}

# HELP hearth_hub_notify_sent_total Total notifier messages delivered
# TYPE hearth_hub_notify_sent_total counter
hearth_hub_notify_sent_total {notify_sent}

# HELP hearth_hub_notify_simulated_total Total simulated notifier acknowledgments
# TYPE hearth_hub_notify_simulated_total counter
hearth_hub_notify_simulated_total {notify_simulated}
"#,
        version = env!("CARGO_PKG_VERSION"),
    );

    (
        [(CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        body,
    )
}
