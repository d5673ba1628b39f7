use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_SECTION: &str = "General";

// ---------------------------------------------------------------------------
// LessonPlan
// ---------------------------------------------------------------------------

/// Decoded result of one lesson-plan completion.
///
/// Every field is optional on the wire. A plan without `steps` is an empty
/// plan, not an error. Per-step requirements (`title`, `content`) are
/// enforced when the step is written so earlier steps still land on disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LessonPlan {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub steps: Vec<Step>,
}

impl LessonPlan {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn title_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.title.as_deref().unwrap_or(fallback)
    }

    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

// ---------------------------------------------------------------------------
// Step
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Step {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    /// Whatever the model put in `order`. Never used for numbering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<serde_json::Value>,
}

impl Step {
    pub fn section_or_default(&self) -> &str {
        self.section.as_deref().unwrap_or(DEFAULT_SECTION)
    }

    /// The model's own ordering hint, when it sent an integer.
    pub fn advisory_order(&self) -> Option<i64> {
        self.order.as_ref().and_then(serde_json::Value::as_i64)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Step>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Step>>::deserialize(deserializer)?.unwrap_or_default())
}
