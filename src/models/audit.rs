//! Audit State Models
//!
//! The audit pipeline's state machine, modeled as a tagged union where each
//! variant carries exactly the data valid in that state. A `Complete` without
//! an analysis payload is unrepresentable by construction.

use serde::{Deserialize, Serialize};

use super::analysis::AnalysisResult;
use super::telemetry::TelemetryRecord;

/// Current state of an audit pipeline.
///
/// Progression: `Idle -> FetchingTelemetry -> AnalyzingContent -> Complete`,
/// with `Failed` reachable from either network stage. `Complete` and `Failed`
/// are terminal until an explicit reset returns to `Idle`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum AuditState {
    /// No audit running; ready to start
    Idle,
    /// Stage 1 in flight: waiting on the telemetry provider
    FetchingTelemetry,
    /// Stage 2 in flight: telemetry obtained, waiting on the analysis provider
    AnalyzingContent { telemetry: TelemetryRecord },
    /// Both stages succeeded
    Complete {
        telemetry: TelemetryRecord,
        analysis: AnalysisResult,
    },
    /// A stage failed; `telemetry` is Some only when stage 1 had already
    /// succeeded before stage 2 failed
    Failed {
        error: String,
        telemetry: Option<TelemetryRecord>,
    },
}

impl AuditState {
    /// Check if an audit is currently in flight
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            AuditState::FetchingTelemetry | AuditState::AnalyzingContent { .. }
        )
    }

    /// Check if this state is terminal until an explicit reset
    pub fn is_terminal(&self) -> bool {
        matches!(self, AuditState::Complete { .. } | AuditState::Failed { .. })
    }
}

impl Default for AuditState {
    fn default() -> Self {
        Self::Idle
    }
}

impl std::fmt::Display for AuditState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuditState::Idle => write!(f, "idle"),
            AuditState::FetchingTelemetry => write!(f, "fetching_telemetry"),
            AuditState::AnalyzingContent { .. } => write!(f, "analyzing_content"),
            AuditState::Complete { .. } => write!(f, "complete"),
            AuditState::Failed { .. } => write!(f, "failed"),
        }
    }
}

/// The combined artifact of a completed audit, as printed by the binary
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    /// Audited page URL
    pub url: String,
    /// Goal the analysis was scored against
    pub goal: String,
    /// RFC 3339 creation timestamp
    pub generated_at: String,
    /// Normalized telemetry from stage 1
    pub telemetry: TelemetryRecord,
    /// Validated analysis with action items in presentation order
    pub analysis: AnalysisResult,
}
