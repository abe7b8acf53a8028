//! Audit Orchestration
//!
//! Drives one audit through its two network stages and owns the state
//! machine observers read. The busy precondition and the first transition
//! happen under a single write lock, so overlapping starts cannot both
//! pass the check.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::models::audit::AuditState;
use crate::services::analysis::AnalysisClient;
use crate::services::telemetry::TelemetryProvider;
use crate::utils::error::{AppError, AppResult};

/// Two-stage audit state machine
pub struct AuditOrchestrator {
    telemetry: Arc<dyn TelemetryProvider>,
    analysis: AnalysisClient,
    state: RwLock<AuditState>,
}

impl AuditOrchestrator {
    /// Create an orchestrator in the Idle state
    pub fn new(telemetry: Arc<dyn TelemetryProvider>, analysis: AnalysisClient) -> Self {
        Self {
            telemetry,
            analysis,
            state: RwLock::new(AuditState::Idle),
        }
    }

    /// Snapshot of the current state
    pub async fn state(&self) -> AuditState {
        self.state.read().await.clone()
    }

    /// Whether an audit is currently in flight
    pub async fn is_busy(&self) -> bool {
        self.state.read().await.is_busy()
    }

    /// Run one audit through both stages.
    ///
    /// Rejected with `InvalidState` while another audit is in flight or
    /// while a completed audit has not been cleared with [`reset`]. Stage
    /// failures are recorded in the Failed state and returned; the
    /// analysis stage keeps the telemetry already fetched.
    ///
    /// [`reset`]: AuditOrchestrator::reset
    pub async fn start_audit(&self, url: &str, goal: &str) -> AppResult<()> {
        {
            let mut state = self.state.write().await;
            if state.is_busy() {
                return Err(AppError::invalid_state("an audit is already in flight"));
            }
            if matches!(*state, AuditState::Complete { .. }) {
                return Err(AppError::invalid_state(
                    "completed audit not cleared; call reset first",
                ));
            }
            *state = AuditState::FetchingTelemetry;
        }
        tracing::info!("Audit started for {}", url);

        let telemetry = match self.telemetry.fetch(url).await {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("Telemetry stage failed: {}", e);
                *self.state.write().await = AuditState::Failed {
                    error: String::from(e.clone()),
                    telemetry: None,
                };
                return Err(e);
            }
        };

        *self.state.write().await = AuditState::AnalyzingContent {
            telemetry: telemetry.clone(),
        };
        tracing::info!("Telemetry stage complete, starting analysis");

        let analysis = match self.analysis.analyze(&telemetry, goal, url).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!("Analysis stage failed: {}", e);
                *self.state.write().await = AuditState::Failed {
                    error: String::from(e.clone()),
                    telemetry: Some(telemetry),
                };
                return Err(e);
            }
        };

        *self.state.write().await = AuditState::Complete {
            telemetry,
            analysis,
        };
        tracing::info!("Audit complete");
        Ok(())
    }

    /// Return to Idle from any state, discarding held results. Idempotent.
    pub async fn reset(&self) {
        *self.state.write().await = AuditState::Idle;
    }
}
