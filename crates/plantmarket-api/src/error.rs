// Handler-level error rendering
//
// Every failure is rendered into the response envelope with its specific
// message; nothing here is fatal to the process and no internals leak.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use plantmarket_contracts::Envelope;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Resource missing, soft-deleted, or owned by someone else. Ownership
    /// misses use the same message as true misses so existence never leaks.
    #[error("{0}")]
    NotFound(String),

    /// Uniqueness violation, e.g. registering an email twice.
    #[error("{0}")]
    Conflict(String),

    /// Request payload failed a domain rule.
    #[error("{0}")]
    Validation(String),

    /// Login password mismatch. Distinct from `NotFound`: unknown email and
    /// wrong password are different failures even though both deny access.
    #[error("Invalid Credentials.")]
    InvalidCredentials,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) | ApiError::Conflict(_) | ApiError::Validation(_) => {
                StatusCode::FORBIDDEN
            }
            ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            ApiError::Internal(err) => {
                tracing::error!("request failed: {:#}", err);
                "Internal server error.".to_string()
            }
            other => other.to_string(),
        };

        (self.status_code(), Json(Envelope::failure(message))).into_response()
    }
}

/// Serialize a DTO into the envelope's `data` field.
pub fn to_data<T: serde::Serialize>(value: T) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::Internal(e.into()))
}
