//! Gemini `generateContent` request and response bodies
//!
//! Only the fields the bridge reads or writes are modelled. Unknown response
//! fields (`usageMetadata`, `modelVersion`, safety ratings, ...) are ignored.

use serde::{Deserialize, Serialize};

/// Turn author in Gemini's content format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentRole {
    User,
    Model,
}

/// One piece of a content turn
///
/// Response parts that carry no text (function calls, inline data) read as
/// `text: None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}

/// A role-tagged content turn sent upstream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub role: ContentRole,
    pub parts: Vec<Part>,
}

/// Sampling options; absent members are omitted from the JSON body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<serde_json::Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<serde_json::Number>,
}

/// Body of `POST /v1beta/models/{model}:generateContent`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    pub generation_config: GenerationConfig,
}

/// Content of a response candidate
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Option<Vec<Part>>,
}

/// One generated alternative
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
    /// Kept as raw JSON: only string values are meaningful
    #[serde(default)]
    pub finish_reason: Option<serde_json::Value>,
}

impl Candidate {
    /// Concatenate the text of every part, in order, with no separator
    pub fn text(&self) -> String {
        self.content
            .iter()
            .flat_map(|c| c.parts.iter().flatten())
            .filter_map(|p| p.text.as_deref())
            .collect()
    }

    /// Lowercased finish reason, or `"stop"` when upstream sent no string
    pub fn finish_reason(&self) -> String {
        match &self.finish_reason {
            Some(serde_json::Value::String(reason)) => reason.to_lowercase(),
            _ => "stop".to_string(),
        }
    }
}

/// Successful `generateContent` response body
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Option<Vec<Candidate>>,
    #[serde(default)]
    pub response_id: Option<String>,
}

impl GenerateContentResponse {
    /// The first candidate; any further candidates are ignored
    pub fn first_candidate(&self) -> Option<&Candidate> {
        self.candidates.as_ref().and_then(|c| c.first())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_serializes_camel_case() {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: ContentRole::Model,
                parts: vec![Part::text("Hi")],
            }],
            system_instruction: None,
            generation_config: GenerationConfig {
                temperature: None,
                max_output_tokens: Some(64.into()),
            },
        };

        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "contents": [{"role": "model", "parts": [{"text": "Hi"}]}],
                "generationConfig": {"maxOutputTokens": 64}
            })
        );
    }

    #[test]
    fn test_empty_generation_config_is_an_empty_object() {
        let value = serde_json::to_value(GenerationConfig::default()).unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn test_response_parses_candidates_and_id() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "A"}, {"text": "B"}]},
                "finishReason": "MAX_TOKENS",
                "index": 0
            }],
            "usageMetadata": {"promptTokenCount": 3},
            "responseId": "abc123"
        }))
        .unwrap();

        let candidate = response.first_candidate().unwrap();
        assert_eq!(candidate.text(), "AB");
        assert_eq!(candidate.finish_reason(), "max_tokens");
        assert_eq!(response.response_id.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_parts_without_text_contribute_nothing() {
        let candidate: Candidate = serde_json::from_value(json!({
            "content": {"parts": [
                {"text": "before "},
                {"functionCall": {"name": "lookup", "args": {}}},
                {"text": "after"}
            ]}
        }))
        .unwrap();
        assert_eq!(candidate.text(), "before after");
    }

    #[test]
    fn test_candidate_without_content_is_empty() {
        let candidate: Candidate =
            serde_json::from_value(json!({"finishReason": "SAFETY"})).unwrap();
        assert_eq!(candidate.text(), "");
        assert_eq!(candidate.finish_reason(), "safety");
    }

    #[test]
    fn test_non_string_finish_reason_falls_back_to_stop() {
        let candidate: Candidate = serde_json::from_value(json!({"finishReason": 1})).unwrap();
        assert_eq!(candidate.finish_reason(), "stop");
        assert_eq!(Candidate::default().finish_reason(), "stop");
    }

    #[test]
    fn test_missing_candidates() {
        let response: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.first_candidate().is_none());

        let response: GenerateContentResponse =
            serde_json::from_value(json!({"candidates": []})).unwrap();
        assert!(response.first_candidate().is_none());
    }
}
