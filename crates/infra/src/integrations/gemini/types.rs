//! Gemini `generateContent` wire types

use healthprod_domain::HealthProdError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Gemini API error types
#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    /// Connection failed, timed out or the server kept failing
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success response not covered by a more specific variant
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limit exceeded (retry after {0}s)")]
    RateLimit(u64),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Response body or model output doesn't match the expected shape
    #[error("Invalid response schema: {0}")]
    InvalidSchema(String),

    #[error("Gemini API key is not configured")]
    MissingApiKey,
}

impl From<GeminiError> for HealthProdError {
    fn from(err: GeminiError) -> Self {
        match err {
            GeminiError::Network(_) => HealthProdError::Network(err.to_string()),
            GeminiError::MissingApiKey => HealthProdError::Config(err.to_string()),
            _ => HealthProdError::Ai(err.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// Single-turn text prompt.
    pub fn prompt(text: impl Into<String>) -> Self {
        Self {
            contents: vec![Content::user(vec![Part::text(text)])],
            system_instruction: None,
            generation_config: None,
        }
    }

    /// Ask for JSON output constrained by `schema`.
    pub fn with_json_schema(mut self, schema: Value) -> Self {
        self.generation_config = Some(GenerationConfig {
            response_mime_type: "application/json".to_string(),
            response_schema: schema,
        });
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(parts: Vec<Part>) -> Self {
        Self { role: Some("user".to_string()), parts }
    }

    pub fn model(parts: Vec<Part>) -> Self {
        Self { role: Some("model".to_string()), parts }
    }

    /// System instructions carry no role.
    pub fn instruction(text: impl Into<String>) -> Self {
        Self { role: None, parts: vec![Part::text(text)] }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: Some(text.into()), inline_data: None }
    }

    pub fn inline(mime_type: impl Into<String>, base64_data: String) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData { mime_type: mime_type.into(), data: base64_data }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InlineData {
    pub mime_type: String,
    /// Standard base64 without a `data:` prefix.
    pub data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerationConfig {
    pub response_mime_type: String,
    pub response_schema: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    pub fn text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let text: String = candidate
            .content
            .as_ref()?
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// `{"error": {...}}` body returned on failure.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn serializes_request_in_camel_case() {
        let mut request =
            GenerateContentRequest::prompt("hi").with_json_schema(json!({"type": "OBJECT"}));
        request.system_instruction = Some(Content::instruction("be kind"));

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(value["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(value["systemInstruction"]["parts"][0]["text"], "be kind");
        assert!(value["systemInstruction"].get("role").is_none());
    }

    #[test]
    fn inline_data_uses_camel_case_keys() {
        let part = Part::inline("image/png", "AAAA".to_string());
        let value = serde_json::to_value(&part).unwrap();
        assert_eq!(value, json!({"inlineData": {"mimeType": "image/png", "data": "AAAA"}}));
    }

    #[test]
    fn extracts_text_from_first_candidate() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "Hello "}, {"text": "there"}]},
                "finishReason": "STOP"
            }]
        }))
        .unwrap();
        assert_eq!(response.text().as_deref(), Some("Hello there"));
    }

    #[test]
    fn blocked_candidate_has_no_text() {
        let response: GenerateContentResponse =
            serde_json::from_value(json!({"candidates": [{"finishReason": "SAFETY"}]})).unwrap();
        assert_eq!(response.text(), None);
        assert_eq!(response.candidates[0].finish_reason.as_deref(), Some("SAFETY"));
    }

    #[test]
    fn gemini_errors_map_onto_domain_errors() {
        let network: HealthProdError = GeminiError::Network("refused".into()).into();
        assert!(matches!(network, HealthProdError::Network(_)));
        let auth: HealthProdError = GeminiError::Authentication("bad key".into()).into();
        assert!(matches!(auth, HealthProdError::Ai(_)));
        let missing: HealthProdError = GeminiError::MissingApiKey.into();
        assert!(matches!(missing, HealthProdError::Config(_)));
    }
}
