//! The shared-state endpoint (`POST /api/state`).

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};

use hearth_types::{
    DefaultStateResponse, GetStateResponse, RegisterAlertResponse, StateRequest,
    UpdateStateResponse,
};

use crate::error::HubError;
use crate::hub::Hub;

/// Status line for an accepted update.
const UPDATED_MESSAGE: &str = "State updated";
/// Status line when the update leaves the alert condition active.
const ALERT_MESSAGE: &str = "ALERT! Lights ON + Room EMPTY";

/// Handler for `POST /api/state`.
///
/// Dispatches on `action`. An absent or unrecognized action falls back to
/// the no-op default query rather than an error; a body that fails to parse
/// maps to the generic 500 shape.
pub async fn state_handler(
    Extension(hub): Extension<Arc<Hub>>,
    body: Result<Json<StateRequest>, JsonRejection>,
) -> Result<Response, HubError> {
    let Json(request) = body.map_err(|e| HubError::Internal(e.to_string()))?;

    match request.action.as_deref() {
        Some("get_state") => {
            let state = hub.get_state(request.device_id.as_deref()).await;
            Ok(Json(GetStateResponse {
                success: true,
                state,
            })
            .into_response())
        }
        Some("update_state") => {
            let outcome = hub
                .update_state(
                    request.key.as_deref(),
                    request.light.as_deref(),
                    request.occupancy.as_deref(),
                )
                .await?;

            let message = if outcome.alert_triggered {
                ALERT_MESSAGE
            } else {
                UPDATED_MESSAGE
            };
            Ok(Json(UpdateStateResponse {
                success: true,
                state: outcome.view,
                alert_triggered: outcome.alert_triggered,
                message: message.to_string(),
            })
            .into_response())
        }
        Some("register_alert") => {
            let alerts = hub.register_alert(request.key.as_deref()).await?;
            Ok(Json(RegisterAlertResponse {
                success: true,
                alerts,
            })
            .into_response())
        }
        _ => {
            let state = hub.current_view().await;
            Ok(Json(DefaultStateResponse {
                success: true,
                state,
            })
            .into_response())
        }
    }
}
