//! Telemetry Service
//!
//! Outbound client for the PageSpeed Insights API plus the provider trait
//! the orchestrator fetches through. Raw payloads are normalized at this
//! boundary; unvalidated shapes never leave the module.

pub mod normalize;

use std::time::Duration;

use async_trait::async_trait;
use site_reporter_llm::build_http_client;

use crate::models::telemetry::{RawTelemetryEnvelope, Strategy, TelemetryRecord};
use crate::utils::error::{AppError, AppResult};

/// Default PageSpeed Insights API endpoint
const PSI_API_URL: &str = "https://www.googleapis.com/pagespeedonline/v5";

/// Lighthouse categories requested with every run
const PSI_CATEGORIES: [&str; 4] = ["PERFORMANCE", "ACCESSIBILITY", "BEST_PRACTICES", "SEO"];

/// Source of normalized telemetry for the first audit stage
#[async_trait]
pub trait TelemetryProvider: Send + Sync {
    /// Fetch and normalize telemetry for the target URL
    async fn fetch(&self, url: &str) -> AppResult<TelemetryRecord>;
}

/// Configuration for the PageSpeed client
#[derive(Debug, Clone, Default)]
pub struct TelemetryConfig {
    /// API key for the measurement provider
    pub api_key: Option<String>,
    /// Custom base URL (optional)
    pub base_url: Option<String>,
    /// Lighthouse run strategy
    pub strategy: Strategy,
    /// Transport timeout for the single request attempt (optional)
    pub timeout: Option<Duration>,
}

/// Client for the PageSpeed Insights `runPagespeed` endpoint
pub struct PageSpeedClient {
    config: TelemetryConfig,
    client: reqwest::Client,
}

impl PageSpeedClient {
    /// Create a new PageSpeed client with the given configuration
    pub fn new(config: TelemetryConfig) -> Self {
        let client = build_http_client(config.timeout);
        Self { config, client }
    }

    /// Get the API base URL
    fn base_url(&self) -> &str {
        self.config
            .base_url
            .as_deref()
            .unwrap_or(PSI_API_URL)
    }

    /// Build the `runPagespeed` request URL for a target page
    fn build_request_url(&self, target_url: &str, api_key: &str) -> AppResult<url::Url> {
        let mut request_url = url::Url::parse(&format!("{}/runPagespeed", self.base_url()))
            .map_err(|e| AppError::config(format!("Invalid telemetry base URL: {}", e)))?;
        {
            let mut query = request_url.query_pairs_mut();
            query.append_pair("url", target_url);
            query.append_pair("strategy", &self.config.strategy.to_string());
            query.append_pair("key", api_key.trim());
            for category in PSI_CATEGORIES {
                query.append_pair("category", category);
            }
        }
        Ok(request_url)
    }
}

#[async_trait]
impl TelemetryProvider for PageSpeedClient {
    async fn fetch(&self, url: &str) -> AppResult<TelemetryRecord> {
        if url.trim().is_empty() {
            return Err(AppError::validation("URL parameter is required"));
        }
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::config("API Key missing"))?;

        let request_url = self.build_request_url(url, api_key)?;
        tracing::info!(
            "Fetching PageSpeed telemetry for {} (strategy: {})",
            url,
            self.config.strategy
        );

        let response = self
            .client
            .get(request_url)
            .send()
            .await
            .map_err(|e| AppError::upstream(502, e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::upstream(502, e.to_string()))?;

        if !status.is_success() {
            let message = upstream_error_message(&body, status);
            tracing::warn!("PageSpeed API error: HTTP {}: {}", status.as_u16(), message);
            return Err(AppError::upstream(status.as_u16(), message));
        }

        tracing::debug!("PageSpeed payload received ({} bytes)", body.len());

        let envelope: RawTelemetryEnvelope = serde_json::from_str(&body).map_err(|e| {
            AppError::malformed_telemetry(format!("Telemetry response was not valid JSON: {}", e))
        })?;

        normalize::normalize(envelope)
    }
}

/// Pull the provider's own message out of an error body, falling back to
/// the HTTP status text
fn upstream_error_message(body: &str, status: reqwest::StatusCode) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")?
                .get("message")?
                .as_str()
                .map(|s| s.to_string())
        })
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .map(|reason| reason.to_string())
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
        })
}
