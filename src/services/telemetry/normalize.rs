//! Telemetry Normalization
//!
//! Converts a raw Lighthouse payload into the internal telemetry record.
//! Category aggregates are rescaled to integers, failing audits are
//! distilled into capped issue lists, and everything else is carried
//! through untouched for downstream analysis.

use crate::models::telemetry::{
    IssueDetail, RawLighthouseResult, RawTelemetryEnvelope, TelemetryMetric, TelemetryRecord,
};
use crate::utils::error::{AppError, AppResult};

/// Core web vitals surfaced as named metrics: (metric id, audit id, title)
const METRIC_AUDITS: [(&str, &str, &str); 3] = [
    ("lcp", "largest-contentful-paint", "Largest Contentful Paint"),
    ("cls", "cumulative-layout-shift", "Cumulative Layout Shift"),
    ("inp", "interaction-to-next-paint", "Interaction to Next Paint"),
];

/// Issues surfaced per category are capped at this count
const MAX_ISSUES_PER_CATEGORY: usize = 5;

/// Audits scoring at or above this threshold count as passing
const PASSING_SCORE: f64 = 0.9;

/// Normalize a raw telemetry envelope into a [`TelemetryRecord`].
///
/// Returns `MalformedTelemetry` when the payload carries no Lighthouse
/// result at all.
pub fn normalize(envelope: RawTelemetryEnvelope) -> AppResult<TelemetryRecord> {
    let lighthouse = envelope.lighthouse_result.ok_or_else(|| {
        AppError::malformed_telemetry(
            "Invalid response from PageSpeed Insights (No Lighthouse data received).",
        )
    })?;

    let performance_score = extract_score(&lighthouse, "performance");
    let accessibility_score = extract_score(&lighthouse, "accessibility");
    let best_practices_score = extract_score(&lighthouse, "best-practices");
    let seo_score = extract_score(&lighthouse, "seo");
    let screenshot_base64 = extract_screenshot(&lighthouse.audits);
    let metrics = extract_metrics(&lighthouse.audits);
    let performance_issues = extract_issues(&lighthouse, "performance");
    let seo_issues = extract_issues(&lighthouse, "seo");

    Ok(TelemetryRecord {
        performance_score,
        accessibility_score,
        best_practices_score,
        seo_score,
        screenshot_base64,
        metrics,
        raw_audits: lighthouse.audits,
        performance_issues,
        seo_issues,
    })
}

/// Category aggregate rescaled from the raw 0.0-1.0 range to an integer
/// score out of 100. A missing category or null aggregate counts as zero.
pub fn extract_score(lighthouse: &RawLighthouseResult, category_id: &str) -> u32 {
    let raw = lighthouse
        .categories
        .get(category_id)
        .and_then(|c| c.score)
        .unwrap_or(0.0);
    (raw * 100.0).round() as u32
}

/// Distill a category's failing audits into an issue list.
///
/// Keeps audit references with weight > 0 whose audit scored below the
/// passing threshold, sorted worst-first (ties keep their original order)
/// and capped at [`MAX_ISSUES_PER_CATEGORY`]. Unknown categories yield an
/// empty list.
pub fn extract_issues(lighthouse: &RawLighthouseResult, category_id: &str) -> Vec<IssueDetail> {
    let category = match lighthouse.categories.get(category_id) {
        Some(c) => c,
        None => return Vec::new(),
    };

    let mut issues: Vec<IssueDetail> = category
        .audit_refs
        .iter()
        .filter_map(|audit_ref| {
            if audit_ref.weight <= 0.0 {
                return None;
            }
            let audit = lighthouse.audits.get(&audit_ref.id)?;
            let score = audit.get("score").and_then(|v| v.as_f64())?;
            if score >= PASSING_SCORE {
                return None;
            }
            Some(IssueDetail {
                id: audit_ref.id.clone(),
                title: audit
                    .get("title")
                    .and_then(|v| v.as_str())
                    .unwrap_or(&audit_ref.id)
                    .to_string(),
                description: audit
                    .get("description")
                    .and_then(|v| v.as_str())
                    .unwrap_or_default()
                    .to_string(),
                score: Some(score),
                display_value: audit
                    .get("displayValue")
                    .and_then(|v| v.as_str())
                    .map(|s| s.to_string()),
            })
        })
        .collect();

    issues.sort_by(|a, b| {
        a.score
            .unwrap_or(0.0)
            .total_cmp(&b.score.unwrap_or(0.0))
    });
    issues.truncate(MAX_ISSUES_PER_CATEGORY);
    issues
}

/// Pull the core web vitals out of the audit map. Metrics keep their raw
/// 0.0-1.0 scores; a missing audit yields null score and display value.
pub fn extract_metrics(audits: &serde_json::Map<String, serde_json::Value>) -> Vec<TelemetryMetric> {
    METRIC_AUDITS
        .iter()
        .map(|(id, audit_id, title)| {
            let audit = audits.get(*audit_id);
            TelemetryMetric {
                id: (*id).to_string(),
                title: (*title).to_string(),
                score: audit
                    .and_then(|a| a.get("score"))
                    .and_then(|v| v.as_f64()),
                display_value: audit
                    .and_then(|a| a.get("displayValue"))
                    .and_then(|v| v.as_str())
                    .map(|s| s.to_string()),
            }
        })
        .collect()
}

/// Screenshot data URI from the final-screenshot audit, when present
pub fn extract_screenshot(audits: &serde_json::Map<String, serde_json::Value>) -> Option<String> {
    audits
        .get("final-screenshot")
        .and_then(|a| a.get("details"))
        .and_then(|d| d.get("data"))
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}
