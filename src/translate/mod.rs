//! Chat-completion ⇄ Gemini translation
//!
//! - [`request`]: `ChatRequest` → `GenerateContentRequest`
//! - [`response`]: `GenerateContentResponse` → `ChatCompletion`
//!
//! Both directions are pure functions; all I/O lives in `crate::upstream`.

pub mod request;
pub mod response;

pub use request::to_generate_content_request;
pub use response::{fallback_response_id, to_chat_completion};
