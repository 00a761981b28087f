//! Minimal client for the Gemini `generateContent` REST endpoint.
//!
//! Only the fields the study assistant needs are modelled: a single user turn,
//! an optional system instruction and the generation config.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    #[error("model returned no text")]
    EmptyResponse,
}

/// One call to the model: a prompt plus its generation parameters.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub prompt: String,
    pub system_instruction: Option<String>,
    pub temperature: f32,
    pub max_output_tokens: u32,
    /// Ask the model for `application/json` output.
    pub json_output: bool,
}

// ── Wire format ───────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireRequest<'a> {
    contents: Vec<WireContent<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<WireContent<'a>>,
    generation_config: WireGenerationConfig,
}

#[derive(Debug, Serialize)]
struct WireContent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<WirePart<'a>>,
}

#[derive(Debug, Serialize)]
struct WirePart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireGenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireResponse {
    #[serde(default)]
    candidates: Vec<WireCandidate>,
    usage_metadata: Option<WireUsage>,
}

#[derive(Debug, Deserialize)]
struct WireCandidate {
    content: Option<WireCandidateContent>,
}

#[derive(Debug, Deserialize)]
struct WireCandidateContent {
    #[serde(default)]
    parts: Vec<WireResponsePart>,
}

#[derive(Debug, Deserialize)]
struct WireResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireUsage {
    prompt_token_count: Option<u64>,
    candidates_token_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct WireErrorEnvelope {
    error: WireErrorBody,
}

#[derive(Debug, Deserialize)]
struct WireErrorBody {
    message: String,
}

// ── Client ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(
        base_url: &str,
        api_key: &str,
        model: &str,
        timeout: Duration,
    ) -> Result<Self, GeminiError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("docstudy/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }

    /// Send one prompt and return the model's text, trimmed.
    pub async fn generate(&self, req: &GenerateRequest) -> Result<String, GeminiError> {
        let body = WireRequest {
            contents: vec![WireContent {
                role: Some("user"),
                parts: vec![WirePart { text: &req.prompt }],
            }],
            system_instruction: req.system_instruction.as_deref().map(|text| WireContent {
                role: None,
                parts: vec![WirePart { text }],
            }),
            generation_config: WireGenerationConfig {
                temperature: req.temperature,
                max_output_tokens: req.max_output_tokens,
                response_mime_type: req.json_output.then_some("application/json"),
            },
        };

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            return Err(GeminiError::Status {
                status: status.as_u16(),
                message: api_error_message(&raw),
            });
        }

        let parsed: WireResponse = response.json().await?;

        if let Some(usage) = &parsed.usage_metadata {
            debug!(
                model = %self.model,
                prompt_tokens = usage.prompt_token_count.unwrap_or(0),
                output_tokens = usage.candidates_token_count.unwrap_or(0),
                "Gemini usage"
            );
        }

        response_text(parsed).ok_or(GeminiError::EmptyResponse)
    }
}

/// Concatenate the text parts of the first candidate.
fn response_text(resp: WireResponse) -> Option<String> {
    let content = resp.candidates.into_iter().next()?.content?;
    let text: String = content
        .parts
        .into_iter()
        .filter_map(|p| p.text)
        .collect();
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Prefer the API's own `error.message`; otherwise return the raw body.
fn api_error_message(raw: &str) -> String {
    match serde_json::from_str::<WireErrorEnvelope>(raw) {
        Ok(envelope) => envelope.error.message,
        Err(_) => raw.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_serializes_camel_case() {
        let body = WireRequest {
            contents: vec![WireContent {
                role: Some("user"),
                parts: vec![WirePart { text: "hello" }],
            }],
            system_instruction: Some(WireContent {
                role: None,
                parts: vec![WirePart { text: "be brief" }],
            }),
            generation_config: WireGenerationConfig {
                temperature: 0.5,
                max_output_tokens: 1200,
                response_mime_type: Some("application/json"),
            },
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(value["systemInstruction"]["parts"][0]["text"], "be brief");
        assert!(value["systemInstruction"].get("role").is_none());
        assert_eq!(value["generationConfig"]["maxOutputTokens"], 1200);
        assert_eq!(value["generationConfig"]["responseMimeType"], "application/json");
    }

    #[test]
    fn test_plain_text_request_omits_mime_type() {
        let body = WireRequest {
            contents: vec![],
            system_instruction: None,
            generation_config: WireGenerationConfig {
                temperature: 0.4,
                max_output_tokens: 1000,
                response_mime_type: None,
            },
        };
        let value = serde_json::to_value(&body).unwrap();
        assert!(value.get("systemInstruction").is_none());
        assert!(value["generationConfig"].get("responseMimeType").is_none());
    }

    #[test]
    fn test_response_text_joins_parts() {
        let resp: WireResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "  Hello, "}, {"text": "world  "}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 3}
        }))
        .unwrap();
        assert_eq!(response_text(resp).as_deref(), Some("Hello, world"));
    }

    #[test]
    fn test_response_without_candidates_is_empty() {
        let resp: WireResponse =
            serde_json::from_value(json!({"promptFeedback": {"blockReason": "SAFETY"}})).unwrap();
        assert!(response_text(resp).is_none());
    }

    #[test]
    fn test_api_error_message_extracted() {
        let raw = r#"{"error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}}"#;
        assert_eq!(api_error_message(raw), "API key not valid.");
        assert_eq!(api_error_message("  upstream down "), "upstream down");
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = GeminiClient::new(
            "http://localhost:9999/",
            "key",
            "gemini-2.5-flash",
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(
            client.endpoint(),
            "http://localhost:9999/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }
}
