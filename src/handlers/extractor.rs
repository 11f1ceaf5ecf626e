//! JSON extractor with `{"error": ...}` rejections
//!
//! Wraps Axum's `Json` extractor so that body problems are reported in the
//! same error shape as every other failure of the bridge.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// Rejection produced by [`ChatJson`]
///
/// Status codes follow the kind of failure:
/// - JSON syntax errors → 400 Bad Request
/// - Wrong shape (e.g. non-string `content`) → 422 Unprocessable Entity
/// - Missing content type → 415 Unsupported Media Type
#[derive(Debug)]
pub struct ChatJsonRejection(JsonRejection);

impl From<ChatJsonRejection> for AppError {
    fn from(rejection: ChatJsonRejection) -> Self {
        let (status, message) = match &rejection.0 {
            JsonRejection::JsonSyntaxError(_) => (StatusCode::BAD_REQUEST, rejection.0.body_text()),
            JsonRejection::JsonDataError(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, rejection.0.body_text())
            }
            JsonRejection::MissingJsonContentType(_) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "Content-Type must be application/json".to_string(),
            ),
            _ => (StatusCode::BAD_REQUEST, rejection.0.body_text()),
        };
        AppError::InvalidBody { status, message }
    }
}

impl IntoResponse for ChatJsonRejection {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

/// JSON body extractor whose rejection renders as `{"error": "<message>"}`
///
/// Handlers that must check other preconditions first can take
/// `Result<ChatJson<T>, ChatJsonRejection>` and convert the rejection with `?`.
pub struct ChatJson<T>(pub T);

impl<S, T> FromRequest<S> for ChatJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ChatJsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ChatJson(value)),
            Err(rejection) => Err(ChatJsonRejection(rejection)),
        }
    }
}
