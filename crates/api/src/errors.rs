use std::fmt::Display;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

pub const FEATURE_DISABLED_MESSAGE: &str = "Light client feature flag is not enabled";

/// Failure of a light client request, classified by who is at fault.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LightClientApiError {
    /// Malformed or invalid client input.
    #[error("{0}")]
    BadRequest(String),

    /// A referenced block or state does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The light client endpoints are switched off.
    #[error("{0}")]
    Unavailable(String),

    /// A collaborator failed or a chain invariant did not hold.
    #[error("{0}")]
    Internal(String),
}

impl LightClientApiError {
    pub fn disabled() -> Self {
        Self::Unavailable(FEATURE_DISABLED_MESSAGE.to_string())
    }

    pub fn not_found(context: &str, err: impl Display) -> Self {
        Self::NotFound(format!("{context}: {err:#}"))
    }

    pub fn internal(context: &str, err: impl Display) -> Self {
        Self::Internal(format!("{context}: {err:#}"))
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) | Self::Unavailable(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Beacon API error body.
#[derive(Debug, Serialize)]
struct ErrorMessage {
    code: u16,
    message: String,
}

impl IntoResponse for LightClientApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            Self::Internal(message) => {
                error!(%status, reason = %message, "light client request failed")
            }
            _ => warn!(%status, reason = %self, "light client request rejected"),
        }

        let body = ErrorMessage {
            code: status.as_u16(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
