//! Error types for gemini-bridge
//!
//! All errors implement `IntoResponse` for Axum handlers. Every variant except
//! [`AppError::Upstream`] renders as `{"error": "<message>"}`; upstream errors
//! are relayed with the upstream status code and body untouched.

use axum::{
    Json,
    body::Body,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::metrics::Outcome;

/// Message returned when a chat request arrives without an API key configured.
pub const MISSING_API_KEY_MESSAGE: &str = "GEMINI_API_KEY is not set in .env";

/// Main error type for the application
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{}", MISSING_API_KEY_MESSAGE)]
    MissingApiKey,

    #[error("Failed to read configuration file {path}: {source}")]
    ConfigFileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration file {path}: {source}")]
    ConfigParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration in {path}: {reason}")]
    ConfigValidationFailed { path: String, reason: String },

    #[error("Invalid request body: {message}")]
    InvalidBody { status: StatusCode, message: String },

    /// Non-2xx answer from the generative API. `body` holds the raw upstream
    /// bytes, already checked to be JSON.
    #[error("Upstream returned {status}")]
    Upstream { status: StatusCode, body: Vec<u8> },

    #[error("{0}")]
    Transport(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Outcome recorded in the request counter for this error
    pub fn outcome(&self) -> Outcome {
        match self {
            Self::Config(_)
            | Self::MissingApiKey
            | Self::ConfigFileRead { .. }
            | Self::ConfigParseFailed { .. }
            | Self::ConfigValidationFailed { .. } => Outcome::ConfigError,
            Self::InvalidBody { .. } => Outcome::InvalidRequest,
            Self::Upstream { .. } => Outcome::UpstreamError,
            Self::Transport(_) | Self::Internal(_) => Outcome::InternalError,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Upstream { status, body } => {
                return Response::builder()
                    .status(status)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body))
                    .unwrap_or_else(|e| {
                        AppError::Internal(format!("failed to relay upstream error: {}", e))
                            .into_response()
                    });
            }
            Self::MissingApiKey => (
                StatusCode::INTERNAL_SERVER_ERROR,
                MISSING_API_KEY_MESSAGE.to_string(),
            ),
            Self::InvalidBody { status, message } => (status, message),
            Self::Transport(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            Self::Config(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            other @ (Self::ConfigFileRead { .. }
            | Self::ConfigParseFailed { .. }
            | Self::ConfigValidationFailed { .. }) => {
                (StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
            }
        };

        let body = Json(serde_json::json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

/// Convenience type alias for Results
pub type AppResult<T> = Result<T, AppError>;
