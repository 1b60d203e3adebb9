//! Request and response bodies for the two HTTP endpoints.
//!
//! Field names follow the original wire format (camelCase), so existing
//! dashboards and firmware keep working unmodified.

use serde::{Deserialize, Serialize};

use crate::{StateSnapshot, StateView, Timestamp};

/// Request body for `POST /api/state`.
///
/// Every field is optional on the wire; which ones matter depends on
/// `action`. An absent or unrecognized action selects the no-op default
/// query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateRequest {
    /// One of `get_state`, `update_state`, `register_alert`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    /// Device identifier to refresh in the liveness map (`get_state` only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    /// Admin key; required for `update_state` and `register_alert`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Requested light status, `"ON"` / `"OFF"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub light: Option<String>,
    /// Requested occupancy, `"OCCUPIED"` / `"EMPTY"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupancy: Option<String>,
}

/// Response for `get_state`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetStateResponse {
    /// Always true on this path.
    pub success: bool,
    /// Full snapshot after eviction and device refresh.
    pub state: StateSnapshot,
}

/// Response for `update_state`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStateResponse {
    /// Always true on this path.
    pub success: bool,
    /// The post-update state view.
    pub state: StateView,
    /// Whether the post-update values form the alert condition
    /// (light ON while the room is EMPTY). Informational only.
    pub alert_triggered: bool,
    /// Human-readable status, distinguishing the alert case.
    pub message: String,
}

/// Response for `register_alert`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterAlertResponse {
    /// Always true on this path.
    pub success: bool,
    /// The alert count after the increment.
    pub alerts: u64,
}

/// Response for the default (no-op) query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultStateResponse {
    /// Always true on this path.
    pub success: bool,
    /// The current state view.
    pub state: StateView,
}

/// Error body shared by both endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always false on this path.
    pub success: bool,
    /// Human-readable error detail.
    pub error: String,
}

/// Request body for `POST /api/notify`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyRequest {
    /// Message text to relay. Required; an empty string is rejected.
    #[serde(default)]
    pub message: Option<String>,
    /// Message category; `"alert"` drives the actuator label.
    #[serde(rename = "type", default = "default_notify_kind")]
    pub kind: String,
    /// Admin key. Required.
    #[serde(default)]
    pub key: Option<String>,
}

fn default_notify_kind() -> String {
    "alert".to_string()
}

impl Default for NotifyRequest {
    fn default() -> Self {
        Self {
            message: None,
            kind: default_notify_kind(),
            key: None,
        }
    }
}

/// Response body for `POST /api/notify`.
///
/// Optional fields are omitted from the JSON when unset, matching the
/// per-mode shapes of the original service (simulated, live, degraded).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifyResponse {
    /// True for every outcome past validation (best-effort policy).
    pub success: bool,
    /// Present and true when no real message was sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simulated: Option<bool>,
    /// Human-readable outcome description.
    pub message: String,
    /// Actuator side-effect label (`"LED ON + BUZZER ON"` for alerts).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub esp32_action: Option<String>,
    /// Raw messaging API response, passed through on live sends.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telegram_response: Option<serde_json::Value>,
    /// Error detail when the relay degraded to a simulated success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Server time of the simulated acknowledgment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,
}
