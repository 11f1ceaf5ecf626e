//! Response mapping: Gemini candidates → chat completion

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::models::chat::ChatCompletion;
use crate::models::gemini::GenerateContentResponse;

/// Prefix of the id synthesized when upstream sends no `responseId`
pub const RESPONSE_ID_PREFIX: &str = "gemini-chat-";

/// Translate a `generateContent` response into a chat completion
///
/// Only the first candidate is used. `model` is the configured model name,
/// not anything reported by upstream. `now` supplies both `created` and the
/// fallback id.
pub fn to_chat_completion(
    response: GenerateContentResponse,
    model: &str,
    now: SystemTime,
) -> ChatCompletion {
    let since_epoch = duration_since_epoch(now);

    let (content, finish_reason) = match response.first_candidate() {
        Some(candidate) => (candidate.text(), candidate.finish_reason()),
        None => (String::new(), "stop".to_string()),
    };

    let id = response
        .response_id
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| fallback_response_id(since_epoch));

    ChatCompletion::new(id, since_epoch.as_secs(), model, content, finish_reason)
}

/// `gemini-chat-<unix millis>`
pub fn fallback_response_id(since_epoch: Duration) -> String {
    format!("{}{}", RESPONSE_ID_PREFIX, since_epoch.as_millis())
}

/// Time since the UNIX epoch, or zero if the system clock is set before it
fn duration_since_epoch(now: SystemTime) -> Duration {
    now.duration_since(UNIX_EPOCH).unwrap_or_else(|e| {
        tracing::warn!(
            error = %e,
            "System clock appears to be before UNIX epoch - using 0 as timestamp"
        );
        Duration::ZERO
    })
}
