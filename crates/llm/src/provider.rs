//! Generative Provider Trait
//!
//! Defines the common interface for all generative providers.

use async_trait::async_trait;

use super::types::{GenerationRequest, LlmError, LlmResult, ProviderConfig};

/// Trait that all generative providers must implement.
///
/// Providers take a single-turn request (text plus optional inline media,
/// optionally constrained by a structured-output schema) and return the raw
/// response text. Parsing and validating that text is the caller's concern.
#[async_trait]
pub trait GenerativeProvider: Send + Sync {
    /// Returns the provider name for identification.
    fn name(&self) -> &'static str;

    /// Returns the current model being used.
    fn model(&self) -> &str;

    /// Returns whether this provider accepts inline media parts.
    fn supports_multimodal(&self) -> bool {
        false // Default: text-only
    }

    /// Run one generation attempt and return the raw response text.
    ///
    /// A provider makes exactly one upstream call per invocation; callers
    /// decide whether a failed attempt is retried (this pipeline never does).
    async fn generate(&self, request: GenerationRequest) -> LlmResult<String>;

    /// Get the configuration for this provider.
    fn config(&self) -> &ProviderConfig;
}

/// Helper function to create an error for missing API key
pub fn missing_api_key_error(provider: &str) -> LlmError {
    LlmError::Misconfiguration {
        message: format!("API key not configured for {}", provider),
    }
}

/// Helper function to parse HTTP error status codes
pub fn parse_http_error(status: u16, body: &str, provider: &str) -> LlmError {
    match status {
        401 => LlmError::AuthenticationFailed {
            message: format!("{}: Invalid API key", provider),
        },
        403 => LlmError::AuthenticationFailed {
            message: format!("{}: Access denied", provider),
        },
        404 => LlmError::Misconfiguration {
            message: format!("{}: model or endpoint not found: {}", provider, body),
        },
        429 => LlmError::RateLimited {
            message: body.to_string(),
        },
        400 => LlmError::InvalidRequest {
            message: body.to_string(),
        },
        500..=599 => LlmError::ServerError {
            message: body.to_string(),
            status: Some(status),
        },
        _ => LlmError::Other {
            message: format!("HTTP {}: {}", status, body),
        },
    }
}
