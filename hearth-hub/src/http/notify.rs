//! The notifier endpoint (`POST /api/notify`).

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::{Extension, Json};

use hearth_types::{NotifyRequest, NotifyResponse, Timestamp};

use crate::error::HubError;
use crate::hub::Hub;
use crate::notifier::{esp32_action, RelayOutcome};

/// Handler for `POST /api/notify`.
///
/// Bad key → 401, empty message → 400; everything past validation reports
/// success, with the relay mode encoded in the body.
pub async fn notify_handler(
    Extension(hub): Extension<Arc<Hub>>,
    body: Result<Json<NotifyRequest>, JsonRejection>,
) -> Result<Json<NotifyResponse>, HubError> {
    // A body that fails to parse carries no key, so it is answered as the
    // missing-key case.
    let request = body.map(|Json(request)| request).unwrap_or_default();

    let outcome = hub
        .send_alert(request.key.as_deref(), request.message.as_deref())
        .await?;
    let action = esp32_action(&request.kind).to_string();

    let response = match outcome {
        RelayOutcome::Sent { response } => NotifyResponse {
            success: true,
            simulated: None,
            message: "Telegram sent successfully".to_string(),
            esp32_action: Some(action),
            telegram_response: Some(response),
            error: None,
            timestamp: None,
        },
        RelayOutcome::Simulated => NotifyResponse {
            success: true,
            simulated: Some(true),
            message: "Telegram simulated (bot not configured)".to_string(),
            esp32_action: Some(action),
            telegram_response: None,
            error: None,
            timestamp: Some(Timestamp::now()),
        },
        RelayOutcome::SimulatedDueToError { detail } => NotifyResponse {
            success: true,
            simulated: Some(true),
            message: "Using simulation due to error".to_string(),
            esp32_action: None,
            telegram_response: None,
            error: Some(detail),
            timestamp: None,
        },
    };

    Ok(Json(response))
}
