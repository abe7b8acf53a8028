//! Telemetry Models
//!
//! Normalized PageSpeed Insights data structures, plus the raw Lighthouse
//! shapes consumed at the provider boundary. Report-facing types serialize
//! with the camelCase field names of the original wire format.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Lighthouse run strategy for the telemetry fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Mobile-first analysis (the provider's default form factor)
    Mobile,
    /// Desktop analysis
    Desktop,
}

impl Default for Strategy {
    fn default() -> Self {
        Self::Mobile
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Mobile => write!(f, "mobile"),
            Strategy::Desktop => write!(f, "desktop"),
        }
    }
}

impl std::str::FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mobile" => Ok(Strategy::Mobile),
            "desktop" => Ok(Strategy::Desktop),
            _ => Err(format!("Unknown strategy: {}", s)),
        }
    }
}

/// One core web vital reading from the audit run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryMetric {
    /// Stable metric identifier (lcp, cls, inp)
    pub id: String,
    /// Human-readable metric title
    pub title: String,
    /// Raw Lighthouse score in [0,1], null when the audit has no score
    pub score: Option<f64>,
    /// Display-ready value (e.g. "1.2 s")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_value: Option<String>,
}

/// One failing or weak audit within a category
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueDetail {
    /// Audit identifier from the category's reference list
    pub id: String,
    /// Audit title
    pub title: String,
    /// Audit description (markdown from the provider)
    pub description: String,
    /// Raw Lighthouse score in [0,1]
    pub score: Option<f64>,
    /// Display-ready value when the audit provides one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_value: Option<String>,
}

/// Normalized telemetry for one audited page.
///
/// Category scores are `round(raw01 * 100)`; issue lists are sorted ascending
/// by score (worst first) and hold at most five entries each.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryRecord {
    /// Performance category score in [0,100]
    pub performance_score: u32,
    /// Accessibility category score in [0,100]
    pub accessibility_score: u32,
    /// Best-practices category score in [0,100]
    pub best_practices_score: u32,
    /// SEO category score in [0,100]
    pub seo_score: u32,
    /// Page screenshot payload (data-URI or raw base64), null when absent
    pub screenshot_base64: Option<String>,
    /// Core web vital readings (lcp, cls, inp)
    pub metrics: Vec<TelemetryMetric>,
    /// Raw audit tree kept verbatim for traceability
    pub raw_audits: serde_json::Map<String, serde_json::Value>,
    /// Worst performance audits, at most five
    pub performance_issues: Vec<IssueDetail>,
    /// Worst SEO audits, at most five
    pub seo_issues: Vec<IssueDetail>,
}

// ---------- Raw Lighthouse shapes (boundary only) ----------

/// Top-level PageSpeed Insights response envelope.
///
/// Absence of `lighthouseResult` on a successful HTTP exchange means the
/// payload is unusable and must abort the pipeline.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTelemetryEnvelope {
    pub lighthouse_result: Option<RawLighthouseResult>,
}

/// The Lighthouse report inside the envelope
#[derive(Debug, Clone, Deserialize)]
pub struct RawLighthouseResult {
    /// Category aggregates keyed by category id
    #[serde(default)]
    pub categories: HashMap<String, RawCategory>,
    /// Individual audits keyed by audit id, kept as raw JSON so unknown
    /// provider fields survive into `TelemetryRecord.rawAudits`
    #[serde(default)]
    pub audits: serde_json::Map<String, serde_json::Value>,
}

/// One category aggregate with its weighted audit references
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCategory {
    /// Aggregate score in [0,1], null when not computed
    pub score: Option<f64>,
    #[serde(default)]
    pub audit_refs: Vec<RawAuditRef>,
}

/// A category's reference to an audit, with its scoring weight
#[derive(Debug, Clone, Deserialize)]
pub struct RawAuditRef {
    pub id: String,
    #[serde(default)]
    pub weight: f64,
}
