//! Chat endpoint
//!
//! `POST /api/chat`: parse → translate → call Gemini → translate back.
//!
//! The API key is checked before the body is looked at, so a server without a
//! key answers 500 for every request and never contacts upstream.

use std::time::SystemTime;

use axum::{
    Extension, Json,
    extract::State,
    response::{IntoResponse, Response},
};

use super::extractor::{ChatJson, ChatJsonRejection};
use crate::error::{AppError, AppResult};
use crate::handlers::AppState;
use crate::metrics::Outcome;
use crate::middleware::RequestId;
use crate::models::chat::{ChatCompletion, ChatRequest};
use crate::translate::{to_chat_completion, to_generate_content_request};

/// POST /api/chat handler
///
/// # Responses
///
/// - `200` chat-completion JSON on success
/// - upstream status and body, verbatim, when Gemini answers non-2xx
/// - `500 {"error": "GEMINI_API_KEY is not set in .env"}` without an API key
/// - `400`/`415`/`422 {"error": ...}` when the body cannot be parsed
/// - `500 {"error": ...}` on transport or decoding failures
pub async fn handler(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<ChatJson<ChatRequest>, ChatJsonRejection>,
) -> Response {
    match complete(&state, request_id, payload).await {
        Ok(completion) => {
            tracing::info!(
                request_id = %request_id,
                finish_reason = %completion.choices[0].finish_reason,
                content_chars = completion.choices[0].message.content.chars().count(),
                "Chat request completed"
            );
            state.metrics().record_request(Outcome::Success);
            Json(completion).into_response()
        }
        Err(err) => {
            log_failure(request_id, &err);
            state.metrics().record_request(err.outcome());
            err.into_response()
        }
    }
}

async fn complete(
    state: &AppState,
    request_id: RequestId,
    payload: Result<ChatJson<ChatRequest>, ChatJsonRejection>,
) -> AppResult<ChatCompletion> {
    let gemini = &state.config().gemini;
    let api_key = gemini.api_key().ok_or(AppError::MissingApiKey)?;

    let ChatJson(request) = payload?;

    tracing::debug!(
        request_id = %request_id,
        model = gemini.model(),
        messages_count = request.messages.len(),
        temperature = ?request.temperature,
        max_tokens = ?request.max_tokens,
        "Forwarding chat request to Gemini"
    );

    let body = to_generate_content_request(&request);
    let response = state
        .client()
        .generate_content(api_key, &body, state.metrics())
        .await?;

    Ok(to_chat_completion(response, gemini.model(), SystemTime::now()))
}

fn log_failure(request_id: RequestId, err: &AppError) {
    match err {
        AppError::MissingApiKey => {
            tracing::error!(request_id = %request_id, "GEMINI_API_KEY is missing");
        }
        AppError::Upstream { status, body } => {
            tracing::error!(
                request_id = %request_id,
                status = status.as_u16(),
                body = %String::from_utf8_lossy(body),
                "Gemini API error"
            );
        }
        AppError::InvalidBody { status, message } => {
            tracing::warn!(
                request_id = %request_id,
                status = status.as_u16(),
                error = %message,
                "Rejected chat request body"
            );
        }
        other => {
            tracing::error!(request_id = %request_id, error = %other, "Server error");
        }
    }
}
