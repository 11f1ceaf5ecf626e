//! Wire types for both sides of the bridge
//!
//! - [`chat`]: the chat-completion request accepted on `/api/chat` and the
//!   response returned from it
//! - [`gemini`]: the `generateContent` request and response bodies
//!
//! The mapping between the two lives in `crate::translate`.

pub mod chat;
pub mod gemini;

pub use chat::{ChatCompletion, ChatMessage, ChatRequest, Choice, ResponseMessage, Role};
pub use gemini::{
    Candidate, CandidateContent, Content, ContentRole, GenerateContentRequest,
    GenerateContentResponse, GenerationConfig, Part,
};
