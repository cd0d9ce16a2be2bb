use serde::{Deserialize, Serialize};

use crate::{models::InputRequest, mock::truncate_chars, prompt::PromptTemplate};

/// Request payload for `/ai_nebula_structurer`.
#[derive(Debug, Deserialize)]
pub struct NebulaRequest {
    /// Unstructured raw thought.
    #[serde(default)]
    pub raw_input: Option<String>,
}

impl InputRequest for NebulaRequest {
    const FIELD: &'static str = "raw_input";

    fn into_input(self) -> Option<String> {
        self.raw_input
    }
}

/// Formal project brief produced from a raw thought.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectBrief {
    pub summary: String,
    pub steps: Vec<String>,
    pub risks: Vec<String>,
    pub timeline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue_model: Option<String>,
}

pub const NEBULA_PROMPT: PromptTemplate = PromptTemplate {
    role: "You are a brainstorming assistant.",
    task: "Structure this raw thought into a formal project brief",
    schema: r#"{
    "summary": "string",
    "steps": ["string"],
    "risks": ["string"],
    "timeline": "string",
    "revenue_model": "optional string"
}"#,
    input_label: "Raw Thought",
};

const SUMMARY_CHARS: usize = 60;

pub fn mock_project_brief(raw_input: &str) -> ProjectBrief {
    ProjectBrief {
        summary: format!(
            "Project brief for: {}",
            truncate_chars(raw_input, SUMMARY_CHARS)
        ),
        steps: vec![
            "Define the core problem and target users".into(),
            "Sketch a minimal first version".into(),
            "Validate with a handful of real users".into(),
            "Iterate on feedback and plan launch".into(),
        ],
        risks: vec![
            "Scope creep before the first release".into(),
            "Unclear demand for the idea".into(),
        ],
        timeline: "2-4 weeks".into(),
        revenue_model: Some("To be determined after validating demand".into()),
    }
}
