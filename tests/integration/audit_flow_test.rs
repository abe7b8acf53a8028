//! Audit Flow Integration Tests
//!
//! Exercises the orchestrator against mocked stage providers: state
//! transitions, failure recording, the single-flight guard, and report
//! composition from a completed audit.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::Notify;

use site_reporter::models::audit::AuditState;
use site_reporter::models::telemetry::IssueDetail;
use site_reporter::services::report;
use site_reporter::{
    AnalysisClient, AppError, AppResult, AuditOrchestrator, TelemetryProvider, TelemetryRecord,
};
use site_reporter_llm::{GenerationRequest, GenerativeProvider, LlmResult, ProviderConfig};

// ============================================================================
// Mock Providers
// ============================================================================

struct StaticTelemetry {
    result: AppResult<TelemetryRecord>,
}

#[async_trait]
impl TelemetryProvider for StaticTelemetry {
    async fn fetch(&self, _url: &str) -> AppResult<TelemetryRecord> {
        self.result.clone()
    }
}

/// Telemetry mock that blocks until released, so tests can observe the
/// orchestrator mid-stage
struct GatedTelemetry {
    gate: Arc<Notify>,
    record: TelemetryRecord,
}

#[async_trait]
impl TelemetryProvider for GatedTelemetry {
    async fn fetch(&self, _url: &str) -> AppResult<TelemetryRecord> {
        self.gate.notified().await;
        Ok(self.record.clone())
    }
}

struct StaticProvider {
    config: ProviderConfig,
    response: LlmResult<String>,
}

#[async_trait]
impl GenerativeProvider for StaticProvider {
    fn name(&self) -> &'static str {
        "static"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn generate(&self, _request: GenerationRequest) -> LlmResult<String> {
        self.response.clone()
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }
}

struct GatedProvider {
    config: ProviderConfig,
    gate: Arc<Notify>,
    response: String,
}

#[async_trait]
impl GenerativeProvider for GatedProvider {
    fn name(&self) -> &'static str {
        "gated"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn generate(&self, _request: GenerationRequest) -> LlmResult<String> {
        self.gate.notified().await;
        Ok(self.response.clone())
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }
}

// ============================================================================
// Fixtures
// ============================================================================

fn sample_telemetry() -> TelemetryRecord {
    TelemetryRecord {
        performance_score: 42,
        accessibility_score: 88,
        best_practices_score: 100,
        seo_score: 70,
        screenshot_base64: Some("data:image/jpeg;base64,aGVsbG8=".to_string()),
        metrics: Vec::new(),
        raw_audits: serde_json::Map::new(),
        performance_issues: vec![IssueDetail {
            id: "unused-javascript".to_string(),
            title: "Reduce unused JavaScript".to_string(),
            description: "Trim bundles.".to_string(),
            score: Some(0.3),
            display_value: Some("Potential savings of 120 KiB".to_string()),
        }],
        seo_issues: Vec::new(),
    }
}

fn analysis_response() -> String {
    json!({
        "effectivenessScore": 65,
        "effectivenessReasoning": "Clear offer, weak call to action.",
        "designScore": 78,
        "designReasoning": "Clean layout with dated typography.",
        "summary": "A capable page slowed down by heavy scripts.",
        "actionItems": [
            {
                "title": "Add testimonials",
                "description": "Social proof near the fold.",
                "category": "Effectiveness",
                "priority": "Low",
                "impact": "Builds trust"
            },
            {
                "title": "Compress hero image",
                "description": "Serve WebP.",
                "category": "Performance",
                "priority": "High",
                "impact": "Improves LCP by reducing load"
            },
            {
                "title": "Increase button contrast",
                "description": "Meet WCAG AA.",
                "category": "Design",
                "priority": "Medium",
                "impact": "Helps visibility"
            }
        ]
    })
    .to_string()
}

fn analysis_client(response: LlmResult<String>) -> AnalysisClient {
    AnalysisClient::new(Arc::new(StaticProvider {
        config: ProviderConfig::default(),
        response,
    }))
}

fn working_orchestrator() -> AuditOrchestrator {
    AuditOrchestrator::new(
        Arc::new(StaticTelemetry {
            result: Ok(sample_telemetry()),
        }),
        analysis_client(Ok(analysis_response())),
    )
}

// ============================================================================
// Happy Path
// ============================================================================

#[tokio::test]
async fn test_happy_path_completes_and_composes_report() {
    let orch = working_orchestrator();
    orch.start_audit("https://example.com", "Sell more shoes")
        .await
        .unwrap();

    let (telemetry, analysis) = match orch.state().await {
        AuditState::Complete {
            telemetry,
            analysis,
        } => (telemetry, analysis),
        other => panic!("unexpected state: {:?}", other),
    };
    assert_eq!(telemetry.performance_score, 42);
    assert_eq!(analysis.effectiveness_score, 65);

    let audit_report = report::compose("https://example.com", "Sell more shoes", telemetry, analysis);
    assert_eq!(audit_report.url, "https://example.com");
    assert_eq!(audit_report.goal, "Sell more shoes");

    // Items come back highest priority first, regardless of response order
    let titles: Vec<&str> = audit_report
        .analysis
        .action_items
        .iter()
        .map(|i| i.title.as_str())
        .collect();
    assert_eq!(
        titles,
        vec![
            "Compress hero image",
            "Increase button contrast",
            "Add testimonials"
        ]
    );
}

#[tokio::test]
async fn test_state_sequence_through_both_stages() {
    let telemetry_gate = Arc::new(Notify::new());
    let analysis_gate = Arc::new(Notify::new());

    let orch = Arc::new(AuditOrchestrator::new(
        Arc::new(GatedTelemetry {
            gate: telemetry_gate.clone(),
            record: sample_telemetry(),
        }),
        AnalysisClient::new(Arc::new(GatedProvider {
            config: ProviderConfig::default(),
            gate: analysis_gate.clone(),
            response: analysis_response(),
        })),
    ));

    assert!(matches!(orch.state().await, AuditState::Idle));

    let task = {
        let orch = orch.clone();
        tokio::spawn(async move { orch.start_audit("https://example.com", "").await })
    };

    while !matches!(orch.state().await, AuditState::FetchingTelemetry) {
        tokio::task::yield_now().await;
    }

    telemetry_gate.notify_one();
    loop {
        match orch.state().await {
            AuditState::AnalyzingContent { telemetry } => {
                // The analysis stage sees exactly what the fetch produced
                assert_eq!(telemetry.performance_score, 42);
                break;
            }
            _ => tokio::task::yield_now().await,
        }
    }

    analysis_gate.notify_one();
    task.await.unwrap().unwrap();
    assert!(matches!(orch.state().await, AuditState::Complete { .. }));
}

// ============================================================================
// Failure Paths
// ============================================================================

#[tokio::test]
async fn test_telemetry_failure_records_upstream_error() {
    let orch = AuditOrchestrator::new(
        Arc::new(StaticTelemetry {
            result: Err(AppError::upstream(400, "Invalid URL")),
        }),
        analysis_client(Ok(analysis_response())),
    );

    let err = orch
        .start_audit("https://not-a-url", "")
        .await
        .unwrap_err();
    match err {
        AppError::Upstream { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Invalid URL");
        }
        other => panic!("unexpected error: {:?}", other),
    }

    match orch.state().await {
        AuditState::Failed { error, telemetry } => {
            assert_eq!(error, "Invalid URL");
            assert!(telemetry.is_none());
        }
        other => panic!("unexpected state: {:?}", other),
    }
}

#[tokio::test]
async fn test_schema_violation_keeps_fetched_telemetry() {
    let mut payload: serde_json::Value = serde_json::from_str(&analysis_response()).unwrap();
    payload.as_object_mut().unwrap().remove("summary");

    let orch = AuditOrchestrator::new(
        Arc::new(StaticTelemetry {
            result: Ok(sample_telemetry()),
        }),
        analysis_client(Ok(payload.to_string())),
    );

    let err = orch
        .start_audit("https://example.com", "")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::SchemaViolation { .. }));

    match orch.state().await {
        AuditState::Failed { error, telemetry } => {
            assert!(error.contains("summary"));
            assert_eq!(telemetry.unwrap().performance_score, 42);
        }
        other => panic!("unexpected state: {:?}", other),
    }
}

#[tokio::test]
async fn test_unknown_enum_value_is_schema_violation_with_path() {
    let mut payload: serde_json::Value = serde_json::from_str(&analysis_response()).unwrap();
    payload["actionItems"][0]["priority"] = json!("Urgent");

    let orch = AuditOrchestrator::new(
        Arc::new(StaticTelemetry {
            result: Ok(sample_telemetry()),
        }),
        analysis_client(Ok(payload.to_string())),
    );

    let err = orch
        .start_audit("https://example.com", "")
        .await
        .unwrap_err();
    match &err {
        AppError::SchemaViolation { path, .. } => {
            assert_eq!(path, "actionItems[0].priority");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_non_json_analysis_is_parse_error() {
    let orch = AuditOrchestrator::new(
        Arc::new(StaticTelemetry {
            result: Ok(sample_telemetry()),
        }),
        analysis_client(Ok("Here is your analysis: great site!".to_string())),
    );

    let err = orch
        .start_audit("https://example.com", "")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Parse(_)));
    assert!(matches!(
        orch.state().await,
        AuditState::Failed { telemetry: Some(_), .. }
    ));
}

// ============================================================================
// Single-Flight Guard and Reset
// ============================================================================

#[tokio::test]
async fn test_overlapping_start_is_rejected() {
    let gate = Arc::new(Notify::new());
    let orch = Arc::new(AuditOrchestrator::new(
        Arc::new(GatedTelemetry {
            gate: gate.clone(),
            record: sample_telemetry(),
        }),
        analysis_client(Ok(analysis_response())),
    ));

    let first = {
        let orch = orch.clone();
        tokio::spawn(async move { orch.start_audit("https://example.com", "").await })
    };

    while !orch.is_busy().await {
        tokio::task::yield_now().await;
    }

    let err = orch
        .start_audit("https://example.com", "")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));

    gate.notify_one();
    first.await.unwrap().unwrap();
    assert!(matches!(orch.state().await, AuditState::Complete { .. }));
}

#[tokio::test]
async fn test_complete_blocks_next_start_until_reset() {
    let orch = working_orchestrator();
    orch.start_audit("https://example.com", "").await.unwrap();

    let err = orch
        .start_audit("https://example.com", "")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));
    assert!(matches!(orch.state().await, AuditState::Complete { .. }));

    orch.reset().await;
    assert!(matches!(orch.state().await, AuditState::Idle));
    orch.start_audit("https://example.com", "").await.unwrap();
    assert!(matches!(orch.state().await, AuditState::Complete { .. }));
}

#[tokio::test]
async fn test_reset_clears_failed_state() {
    let orch = AuditOrchestrator::new(
        Arc::new(StaticTelemetry {
            result: Err(AppError::upstream(500, "Internal error")),
        }),
        analysis_client(Ok(analysis_response())),
    );

    orch.start_audit("https://example.com", "").await.unwrap_err();
    assert!(matches!(orch.state().await, AuditState::Failed { .. }));

    orch.reset().await;
    assert!(matches!(orch.state().await, AuditState::Idle));
}
