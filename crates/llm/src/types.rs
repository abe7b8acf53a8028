//! Provider Types
//!
//! Core types for generative provider interactions.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration for a generative provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API key (read from the environment by the binary)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Base URL override (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Model name to use
    pub model: String,
    /// Optional transport timeout for the single request attempt
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<Duration>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            model: "gemini-3-pro-preview".to_string(),
            timeout: None,
        }
    }
}

/// Content type within a generation request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    /// Plain text content
    Text { text: String },
    /// Base64-encoded inline media (e.g. a page screenshot)
    InlineData { mime_type: String, data: String },
}

impl ContentPart {
    /// Create a text part
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Create an inline media part from a base64 payload
    pub fn inline_data(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self::InlineData {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }
}

/// A single-turn generation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Content parts in the order they are presented to the model
    pub parts: Vec<ContentPart>,
    /// Optional structured-output schema the response text must conform to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
}

impl GenerationRequest {
    /// Create a request from content parts
    pub fn new(parts: Vec<ContentPart>) -> Self {
        Self {
            parts,
            response_schema: None,
        }
    }

    /// Attach a structured-output schema to the request
    pub fn with_schema(mut self, schema: serde_json::Value) -> Self {
        self.response_schema = Some(schema);
        self
    }
}

/// Error types for provider operations
#[derive(Debug, Clone, Error)]
pub enum LlmError {
    /// Authentication rejected by the provider (invalid or revoked key)
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },
    /// Rate limit exceeded
    #[error("Rate limited: {message}")]
    RateLimited { message: String },
    /// Invalid request (bad parameters)
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },
    /// Server error from the provider
    #[error("Server error: {message}")]
    ServerError {
        message: String,
        status: Option<u16>,
    },
    /// Network/connection error
    #[error("Network error: {message}")]
    NetworkError { message: String },
    /// Response parsing error
    #[error("Parse error: {message}")]
    ParseError { message: String },
    /// Client-side configuration problem (missing key, unknown model)
    #[error("Provider misconfigured: {message}")]
    Misconfiguration { message: String },
    /// Other error
    #[error("Error: {message}")]
    Other { message: String },
}

/// Result type for provider operations
pub type LlmResult<T> = Result<T, LlmError>;
