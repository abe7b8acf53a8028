//! Gemini Provider
//!
//! Implementation of the GenerativeProvider trait for Google's Gemini API
//! using the REST `generateContent` endpoint. Supports inline media parts
//! and schema-constrained JSON output via `generationConfig.responseSchema`.

use async_trait::async_trait;

use super::provider::{missing_api_key_error, parse_http_error, GenerativeProvider};
use super::types::{ContentPart, GenerationRequest, LlmError, LlmResult, ProviderConfig};
use crate::http_client::build_http_client;

/// Default Gemini API endpoint
const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini provider backed by the REST API.
///
/// Uses reqwest directly instead of an SDK so the model name stays a runtime
/// string and the request body mirrors the wire format exactly.
pub struct GeminiProvider {
    config: ProviderConfig,
    client: reqwest::Client,
}

impl GeminiProvider {
    /// Create a new Gemini provider with the given configuration
    pub fn new(config: ProviderConfig) -> Self {
        let client = build_http_client(config.timeout);
        Self { config, client }
    }

    /// Get the API base URL
    fn base_url(&self) -> &str {
        self.config.base_url.as_deref().unwrap_or(GEMINI_API_URL)
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url(),
            self.config.model
        )
    }

    /// Convert a ContentPart to the Gemini wire format
    fn part_to_api(part: &ContentPart) -> serde_json::Value {
        match part {
            ContentPart::Text { text } => serde_json::json!({ "text": text }),
            ContentPart::InlineData { mime_type, data } => serde_json::json!({
                "inline_data": {
                    "mime_type": mime_type,
                    "data": data,
                }
            }),
        }
    }

    /// Build the request body for the API
    fn build_request_body(&self, request: &GenerationRequest) -> serde_json::Value {
        let parts: Vec<serde_json::Value> =
            request.parts.iter().map(Self::part_to_api).collect();

        let mut body = serde_json::json!({
            "contents": [{ "parts": parts }],
        });

        if let Some(schema) = &request.response_schema {
            body["generationConfig"] = serde_json::json!({
                "responseMimeType": "application/json",
                "responseSchema": schema,
            });
        }

        body
    }

    /// Extract the first candidate's concatenated text from a decoded response
    fn extract_text(response: GeminiResponse) -> LlmResult<String> {
        let text: String = response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect()
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(LlmError::ParseError {
                message: "No response from Gemini".to_string(),
            });
        }
        Ok(text)
    }
}

#[async_trait]
impl GenerativeProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    fn supports_multimodal(&self) -> bool {
        true
    }

    async fn generate(&self, request: GenerationRequest) -> LlmResult<String> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or_else(|| missing_api_key_error("gemini"))?;
        let body = self.build_request_body(&request);

        let url = self.endpoint();
        tracing::debug!("Gemini generate POST {} ({} parts)", url, request.parts.len());

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::NetworkError {
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        let body_text = response.text().await.map_err(|e| LlmError::NetworkError {
            message: e.to_string(),
        })?;

        if status != 200 {
            tracing::warn!("Gemini API error: HTTP {} from {}", status, url);
            return Err(parse_http_error(status, &body_text, "gemini"));
        }

        let gemini_response: GeminiResponse =
            serde_json::from_str(&body_text).map_err(|e| LlmError::ParseError {
                message: format!("Failed to parse response: {}", e),
            })?;

        Self::extract_text(gemini_response)
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }
}

// ---------- Response types (REST wire format) ----------

#[derive(Debug, serde::Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, serde::Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Debug, serde::Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, serde::Deserialize)]
struct GeminiPart {
    text: Option<String>,
}
