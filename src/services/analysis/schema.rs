//! Analysis Schema Contract
//!
//! Declares the structured-output schema sent to the generative provider
//! and enforces the same contract on the way back in. Responses are
//! validated field by field so violations carry the exact path; values
//! are never coerced into shape.

use crate::models::analysis::{ActionCategory, ActionItem, ActionPriority, AnalysisResult};
use crate::utils::error::{AppError, AppResult};

/// Response schema for the analysis call, in the provider's uppercase
/// REST type names
pub fn response_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "effectivenessScore": {
                "type": "NUMBER",
                "description": "Score from 0-100 based on CRO best practices."
            },
            "effectivenessReasoning": {
                "type": "STRING",
                "description": "A detailed paragraph explaining WHY this effectiveness score was given, citing specific positive and negative observations."
            },
            "designScore": {
                "type": "NUMBER",
                "description": "Score from 0-100 based on UI/UX best practices."
            },
            "designReasoning": {
                "type": "STRING",
                "description": "A detailed paragraph explaining WHY this design score was given, citing specific positive and negative observations."
            },
            "summary": {
                "type": "STRING",
                "description": "A 2-3 sentence executive summary of the findings."
            },
            "actionItems": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "description": { "type": "STRING" },
                        "category": { "type": "STRING", "enum": ActionCategory::VALUES },
                        "priority": { "type": "STRING", "enum": ActionPriority::VALUES },
                        "impact": {
                            "type": "STRING",
                            "description": "Why this matters (e.g. 'Improves LCP by reducing load')."
                        }
                    },
                    "required": ["title", "description", "category", "priority", "impact"]
                }
            }
        },
        "required": [
            "effectivenessScore",
            "effectivenessReasoning",
            "designScore",
            "designReasoning",
            "summary",
            "actionItems"
        ]
    })
}

/// Validate a decoded response payload against the contract.
///
/// Every violation names the offending field path, nested items as
/// `actionItems[2].priority`.
pub fn validate(payload: &serde_json::Value) -> AppResult<AnalysisResult> {
    let obj = payload
        .as_object()
        .ok_or_else(|| AppError::schema_violation("$", "expected a JSON object"))?;

    let effectiveness_score = score_field(obj, "effectivenessScore")?;
    let effectiveness_reasoning = string_field(obj, "effectivenessReasoning", "effectivenessReasoning")?;
    let design_score = score_field(obj, "designScore")?;
    let design_reasoning = string_field(obj, "designReasoning", "designReasoning")?;
    let summary = string_field(obj, "summary", "summary")?;

    let items = obj
        .get("actionItems")
        .ok_or_else(|| AppError::schema_violation("actionItems", "required field is missing"))?
        .as_array()
        .ok_or_else(|| AppError::schema_violation("actionItems", "expected an array"))?;

    let mut action_items = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        action_items.push(validate_action_item(item, index)?);
    }

    Ok(AnalysisResult {
        effectiveness_score,
        effectiveness_reasoning,
        design_score,
        design_reasoning,
        summary,
        action_items,
    })
}

fn validate_action_item(value: &serde_json::Value, index: usize) -> AppResult<ActionItem> {
    let obj = value.as_object().ok_or_else(|| {
        AppError::schema_violation(format!("actionItems[{}]", index), "expected an object")
    })?;
    let path = |field: &str| format!("actionItems[{}].{}", index, field);

    let category = string_field(obj, "category", &path("category"))?
        .parse::<ActionCategory>()
        .map_err(|e| AppError::schema_violation(path("category"), e))?;
    let priority = string_field(obj, "priority", &path("priority"))?
        .parse::<ActionPriority>()
        .map_err(|e| AppError::schema_violation(path("priority"), e))?;

    Ok(ActionItem {
        title: string_field(obj, "title", &path("title"))?,
        description: string_field(obj, "description", &path("description"))?,
        category,
        priority,
        impact: string_field(obj, "impact", &path("impact"))?,
    })
}

fn string_field(
    obj: &serde_json::Map<String, serde_json::Value>,
    field: &str,
    path: &str,
) -> AppResult<String> {
    match obj.get(field) {
        None => Err(AppError::schema_violation(path, "required field is missing")),
        Some(serde_json::Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(AppError::schema_violation(path, "expected a string")),
    }
}

/// Scores must arrive as integers in 0-100; fractional or negative numbers
/// are violations, not candidates for rounding
fn score_field(obj: &serde_json::Map<String, serde_json::Value>, field: &str) -> AppResult<u32> {
    let value = obj
        .get(field)
        .ok_or_else(|| AppError::schema_violation(field, "required field is missing"))?;
    let score = value
        .as_u64()
        .ok_or_else(|| AppError::schema_violation(field, "expected an integer score"))?;
    if score > 100 {
        return Err(AppError::schema_violation(field, "score out of range 0-100"));
    }
    Ok(score as u32)
}
