//! Analysis Service
//!
//! Second audit stage: sends the telemetry brief to a generative provider
//! and validates the structured response against the schema contract.

pub mod request;
pub mod schema;

use std::sync::Arc;

use site_reporter_llm::GenerativeProvider;

use crate::models::analysis::AnalysisResult;
use crate::models::telemetry::TelemetryRecord;
use crate::utils::error::{AppError, AppResult};

/// Client for the analysis stage, generic over the generative provider
#[derive(Clone)]
pub struct AnalysisClient {
    provider: Arc<dyn GenerativeProvider>,
}

impl AnalysisClient {
    /// Create a new analysis client backed by the given provider
    pub fn new(provider: Arc<dyn GenerativeProvider>) -> Self {
        Self { provider }
    }

    /// Run one analysis: build the brief, call the provider once, and
    /// validate the response. No retries on failure.
    pub async fn analyze(
        &self,
        telemetry: &TelemetryRecord,
        goal: &str,
        url: &str,
    ) -> AppResult<AnalysisResult> {
        if url.trim().is_empty() {
            return Err(AppError::validation("URL parameter is required"));
        }

        let generation_request = request::build_request(telemetry, goal, url);
        tracing::info!(
            "Requesting analysis from {} (model: {})",
            self.provider.name(),
            self.provider.model()
        );

        let text = self.provider.generate(generation_request).await?;
        tracing::debug!("Analysis response received ({} bytes)", text.len());

        let payload: serde_json::Value = serde_json::from_str(&text)
            .map_err(|e| AppError::parse(format!("Failed to parse analysis response: {}", e)))?;
        schema::validate(&payload)
    }
}
