//! Error types for hearth-hub.
//!
//! Authorization and validation failures surface to the caller with distinct
//! status codes; anything else on the state endpoint maps to a generic 500
//! with detail. The notifier absorbs its own failures (see
//! [`crate::notifier::RelayOutcome`]) and never reaches this mapping past
//! validation.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use hearth_types::ErrorResponse;

/// Main error type for hub request handling.
#[derive(Debug, thiserror::Error)]
pub enum HubError {
    /// Credential missing or mismatched.
    #[error("invalid admin key")]
    Unauthorized,

    /// A required field is missing or empty.
    #[error("{field} required")]
    InvalidArgument {
        /// The offending field.
        field: &'static str,
    },

    /// Outbound HTTP client construction failed at startup.
    #[error("notifier client error: {0}")]
    Client(#[from] reqwest::Error),

    /// Any other failure, reported with detail.
    #[error("internal error: {0}")]
    Internal(String),
}

impl HubError {
    /// The HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::InvalidArgument { .. } => StatusCode::BAD_REQUEST,
            Self::Client(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for HubError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            success: false,
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

/// Result type alias for hub operations.
pub type Result<T> = std::result::Result<T, HubError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(HubError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            HubError::InvalidArgument { field: "message" }.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            HubError::Internal("boom".to_string()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn error_display() {
        assert_eq!(HubError::Unauthorized.to_string(), "invalid admin key");
        assert_eq!(
            HubError::InvalidArgument { field: "message" }.to_string(),
            "message required"
        );
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HubError>();
    }
}
