//! Report Composition
//!
//! Pure presentation step over a completed audit: orders action items by
//! priority and stamps the final report.

use crate::models::analysis::{ActionItem, AnalysisResult};
use crate::models::audit::AuditReport;
use crate::models::telemetry::TelemetryRecord;
use crate::services::analysis::request::DEFAULT_GOAL;

/// Action items reordered highest priority first. Items of equal priority
/// keep the order the analysis produced them in.
pub fn ordered_action_items(items: &[ActionItem]) -> Vec<ActionItem> {
    let mut ordered = items.to_vec();
    ordered.sort_by(|a, b| b.priority.rank().cmp(&a.priority.rank()));
    ordered
}

/// Assemble the final report from both stage outputs
pub fn compose(
    url: &str,
    goal: &str,
    telemetry: TelemetryRecord,
    mut analysis: AnalysisResult,
) -> AuditReport {
    let goal = if goal.trim().is_empty() { DEFAULT_GOAL } else { goal };
    analysis.action_items = ordered_action_items(&analysis.action_items);
    AuditReport {
        url: url.to_string(),
        goal: goal.to_string(),
        generated_at: chrono::Utc::now().to_rfc3339(),
        telemetry,
        analysis,
    }
}
