//! Analysis Models
//!
//! Validated output of the generative analysis stage. Category and priority
//! are closed enumerations: a payload using any other string is rejected at
//! validation, never coerced to a default.

use serde::{Deserialize, Serialize};

/// Action item category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionCategory {
    Performance,
    Effectiveness,
    Design,
}

impl ActionCategory {
    /// All wire values, in schema declaration order
    pub const VALUES: [&'static str; 3] = ["Performance", "Effectiveness", "Design"];
}

impl std::fmt::Display for ActionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionCategory::Performance => write!(f, "Performance"),
            ActionCategory::Effectiveness => write!(f, "Effectiveness"),
            ActionCategory::Design => write!(f, "Design"),
        }
    }
}

impl std::str::FromStr for ActionCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Performance" => Ok(ActionCategory::Performance),
            "Effectiveness" => Ok(ActionCategory::Effectiveness),
            "Design" => Ok(ActionCategory::Design),
            _ => Err(format!("Unknown action category: {}", s)),
        }
    }
}

/// Action item priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionPriority {
    High,
    Medium,
    Low,
}

impl ActionPriority {
    /// All wire values, in schema declaration order
    pub const VALUES: [&'static str; 3] = ["High", "Medium", "Low"];

    /// Ordering rank used for presentation: High=3, Medium=2, Low=1
    pub fn rank(&self) -> u8 {
        match self {
            ActionPriority::High => 3,
            ActionPriority::Medium => 2,
            ActionPriority::Low => 1,
        }
    }
}

impl std::fmt::Display for ActionPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionPriority::High => write!(f, "High"),
            ActionPriority::Medium => write!(f, "Medium"),
            ActionPriority::Low => write!(f, "Low"),
        }
    }
}

impl std::str::FromStr for ActionPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "High" => Ok(ActionPriority::High),
            "Medium" => Ok(ActionPriority::Medium),
            "Low" => Ok(ActionPriority::Low),
            _ => Err(format!("Unknown action priority: {}", s)),
        }
    }
}

/// One recommended remediation from the analysis provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionItem {
    /// Short recommendation title
    pub title: String,
    /// What to change and where
    pub description: String,
    /// Which aspect of the page the item addresses
    pub category: ActionCategory,
    /// Urgency ranking used for presentation order
    pub priority: ActionPriority,
    /// Expected impact rationale
    pub impact: String,
}

/// Validated result of the generative analysis stage
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Conversion-effectiveness score in [0,100]
    pub effectiveness_score: u32,
    /// Reasoning behind the effectiveness score
    pub effectiveness_reasoning: String,
    /// Visual design score in [0,100]
    pub design_score: u32,
    /// Reasoning behind the design score
    pub design_reasoning: String,
    /// Executive summary of the findings
    pub summary: String,
    /// Recommended remediations in provider order
    pub action_items: Vec<ActionItem>,
}
