//! Analysis Request Builder
//!
//! Assembles the multimodal generation request for the analysis stage:
//! an optional screenshot part followed by the textual brief, with the
//! response schema attached.

use site_reporter_llm::{ContentPart, GenerationRequest};

use crate::models::telemetry::TelemetryRecord;
use crate::services::analysis::schema;

/// Goal used when the caller does not supply one
pub const DEFAULT_GOAL: &str = "General Improvement";

/// Fallback MIME type when the screenshot carries no data URI marker
const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

/// Build the full generation request for one analysis call
pub fn build_request(telemetry: &TelemetryRecord, goal: &str, url: &str) -> GenerationRequest {
    let mut parts = Vec::new();
    if let Some(part) = image_part(telemetry.screenshot_base64.as_deref()) {
        parts.push(part);
    }
    parts.push(ContentPart::text(build_brief(telemetry, goal, url)));
    GenerationRequest::new(parts).with_schema(schema::response_schema())
}

/// Turn the screenshot field into an inline image part.
///
/// Telemetry delivers the screenshot as a data URI; the provider expects
/// raw base64, so the marker is stripped while its MIME type is kept. An
/// undecodable payload drops the part, since the image is optional.
fn image_part(screenshot: Option<&str>) -> Option<ContentPart> {
    let raw = screenshot?;
    let (mime_type, payload) = split_data_uri(raw);

    use base64::Engine;
    if let Err(e) = base64::engine::general_purpose::STANDARD.decode(payload) {
        tracing::warn!("Dropping screenshot: payload is not valid base64 ({})", e);
        return None;
    }

    Some(ContentPart::inline_data(mime_type, payload))
}

/// Split a `data:<mime>;base64,<payload>` URI into its MIME type and
/// payload. Bare payloads pass through with the default MIME type.
fn split_data_uri(raw: &str) -> (&str, &str) {
    if let Some(rest) = raw.strip_prefix("data:") {
        if let Some((mime, payload)) = rest.split_once(";base64,") {
            if mime.is_empty() {
                return (DEFAULT_IMAGE_MIME, payload);
            }
            return (mime, payload);
        }
    }
    (DEFAULT_IMAGE_MIME, raw)
}

/// Render the textual brief: target, goal, category scores and the named
/// metrics, followed by fixed task instructions
pub fn build_brief(telemetry: &TelemetryRecord, goal: &str, url: &str) -> String {
    let goal = if goal.trim().is_empty() { DEFAULT_GOAL } else { goal };
    let metric_lines = telemetry
        .metrics
        .iter()
        .map(|m| format!("- {}: {}", m.title, m.display_value.as_deref().unwrap_or("n/a")))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are an expert web conversion rate optimization (CRO) specialist and UI/UX designer.

I will provide data for the website: {url}

The user has a specific goal for this website: "{goal}".

Here is the summary of the PageSpeed Insights performance data:
- Performance Score: {performance}/100
- Accessibility Score: {accessibility}/100
- Best Practices Score: {best_practices}/100
- SEO Score: {seo}/100

Key Metrics:
{metrics}

Your task:
1. Analyze the visual design of the website based on the provided screenshot. Provide a specific design score and a paragraph explaining your reasoning.
2. Evaluate the potential effectiveness (conversions) based on the goal. Provide a specific effectiveness score and a paragraph explaining your reasoning.
3. Synthesize this with the performance data. Ensure your design recommendations do not negatively impact performance (e.g., don't suggest massive hero videos if LCP is already poor, unless optimized).
4. Provide a holistic list of action items.

Return a structured JSON object."#,
        url = url,
        goal = goal,
        performance = telemetry.performance_score,
        accessibility = telemetry.accessibility_score,
        best_practices = telemetry.best_practices_score,
        seo = telemetry.seo_score,
        metrics = metric_lines,
    )
}
