//! Request mapping: chat messages → Gemini contents

use crate::models::chat::{ChatRequest, Role};
use crate::models::gemini::{Content, ContentRole, GenerateContentRequest, GenerationConfig, Part};

impl From<&Role> for ContentRole {
    /// `assistant` becomes `model`; every other role is a user turn
    fn from(role: &Role) -> Self {
        match role {
            Role::Assistant => ContentRole::Model,
            Role::System | Role::User | Role::Other(_) => ContentRole::User,
        }
    }
}

/// Translate a chat request into a `generateContent` body
///
/// The first `system` message becomes `systemInstruction` (tagged `user`, as
/// the API expects); any later system messages are dropped. All other messages
/// keep their order in `contents`. Sampling options are copied only when the
/// caller supplied them.
pub fn to_generate_content_request(request: &ChatRequest) -> GenerateContentRequest {
    let system_instruction = request
        .messages
        .iter()
        .find(|m| m.role == Role::System)
        .map(|m| Content {
            role: ContentRole::User,
            parts: vec![Part::text(m.content.as_str())],
        });

    let contents = request
        .messages
        .iter()
        .filter(|m| m.role != Role::System)
        .map(|m| Content {
            role: ContentRole::from(&m.role),
            parts: vec![Part::text(m.content.as_str())],
        })
        .collect();

    GenerateContentRequest {
        contents,
        system_instruction,
        generation_config: GenerationConfig {
            temperature: request.temperature.clone(),
            max_output_tokens: request.max_tokens.clone(),
        },
    }
}
