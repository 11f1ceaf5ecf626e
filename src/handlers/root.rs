//! Liveness endpoint
//!
//! `GET /` answers 200 with a plain-text banner, whether or not an API key
//! is configured.

/// Banner returned by `GET /`
pub const LIVENESS_MESSAGE: &str = "MaliAI backend is up (Gemini)";

/// Liveness handler
pub async fn handler() -> &'static str {
    LIVENESS_MESSAGE
}
