//! Chat-completion request and response types
//!
//! The request side is deliberately lenient: unknown fields are ignored,
//! `messages` defaults to empty and the sampling options are honored only
//! when they are JSON numbers.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Object type for non-streaming chat completion responses
pub const OBJECT_CHAT_COMPLETION: &str = "chat.completion";

// =============================================================================
// Message Types
// =============================================================================

/// Message role in the conversation
///
/// Roles other than `system`, `user` and `assistant` are kept verbatim in
/// [`Role::Other`]; they are forwarded upstream as user turns. Matching is
/// case-sensitive, so `"System"` is an `Other` role. A missing, `null` or
/// non-string role reads as an empty `Other` role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    System,
    User,
    Assistant,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Other(role) => role,
        }
    }
}

impl From<&str> for Role {
    fn from(role: &str) -> Self {
        match role {
            "system" => Role::System,
            "user" => Role::User,
            "assistant" => Role::Assistant,
            other => Role::Other(other.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(s) => Ok(Role::from(s.as_str())),
            _ => Ok(Role::default()),
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Other(String::new())
    }
}

impl Serialize for Role {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// A single message in the conversation
///
/// Content is not validated; empty strings are forwarded as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: impl Into<Role>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

// =============================================================================
// Chat Request
// =============================================================================

/// Body of `POST /api/chat`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    #[serde(
        default,
        deserialize_with = "numeric_only",
        skip_serializing_if = "Option::is_none"
    )]
    pub temperature: Option<serde_json::Number>,
    #[serde(
        default,
        deserialize_with = "numeric_only",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_tokens: Option<serde_json::Number>,
}

impl ChatRequest {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            ..Self::default()
        }
    }

    /// Set the sampling temperature
    ///
    /// Non-finite values cannot be represented in JSON and are dropped.
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = serde_json::Number::from_f64(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u64) -> Self {
        self.max_tokens = Some(max_tokens.into());
        self
    }
}

/// Keep a field only when it holds a JSON number
///
/// Strings, booleans, objects and `null` all read as absent.
fn numeric_only<'de, D>(deserializer: D) -> Result<Option<serde_json::Number>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Number(n) => Ok(Some(n)),
        _ => Ok(None),
    }
}

// =============================================================================
// Chat Completion Response
// =============================================================================

/// Assistant message in response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseMessage {
    pub role: Role,
    pub content: String,
}

impl ResponseMessage {
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// A single choice in the response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub index: u32,
    pub message: ResponseMessage,
    /// Upstream finish reason, lowercased (`"stop"`, `"max_tokens"`, `"safety"`, ...)
    pub finish_reason: String,
}

/// Chat-completion response returned from `/api/chat`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletion {
    pub id: String,
    pub object: String,
    pub created: u64,
    pub model: String,
    pub choices: Vec<Choice>,
}

impl ChatCompletion {
    /// Build a single-choice completion
    pub fn new(
        id: String,
        created: u64,
        model: impl Into<String>,
        content: String,
        finish_reason: String,
    ) -> Self {
        Self {
            id,
            object: OBJECT_CHAT_COMPLETION.to_string(),
            created,
            model: model.into(),
            choices: vec![Choice {
                index: 0,
                message: ResponseMessage::assistant(content),
                finish_reason,
            }],
        }
    }
}
