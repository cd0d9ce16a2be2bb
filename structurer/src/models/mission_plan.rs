use serde::{Deserialize, Serialize};

use crate::{models::InputRequest, mock::truncate_chars, prompt::PromptTemplate};

/// Request payload for `/ai_mission_plan`.
#[derive(Debug, Deserialize)]
pub struct MissionPlanRequest {
    /// Short free-text mission idea.
    #[serde(default)]
    pub idea: Option<String>,
}

impl InputRequest for MissionPlanRequest {
    const FIELD: &'static str = "idea";

    fn into_input(self) -> Option<String> {
        self.idea
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// Structured mission returned by the model (or the mock).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionPlan {
    pub mission_title: String,
    pub mission_description: String,
    pub priority: Priority,
    pub estimated_minutes: f64,
    pub subtasks: Vec<String>,
}

pub const MISSION_PLAN_PROMPT: PromptTemplate = PromptTemplate {
    role: "You are a productivity assistant.",
    task: "Given a mission idea, generate a structured plan",
    schema: r#"{
    "mission_title": "string",
    "mission_description": "string",
    "priority": "low" | "medium" | "high",
    "estimated_minutes": number,
    "subtasks": ["string"]
}"#,
    input_label: "Idea",
};

const TITLE_CHARS: usize = 40;
const DESCRIPTION_CHARS: usize = 120;

/// Network-free stand-in used when no Gemini key is configured.
pub fn mock_mission_plan(idea: &str) -> MissionPlan {
    MissionPlan {
        mission_title: format!("Mission: {}", truncate_chars(idea, TITLE_CHARS)),
        mission_description: format!(
            "A focused, step-by-step plan to accomplish \"{}\".",
            truncate_chars(idea, DESCRIPTION_CHARS)
        ),
        priority: Priority::Medium,
        estimated_minutes: 60.0,
        subtasks: vec![
            "Clarify the goal and what done looks like".into(),
            "Break the work into small steps".into(),
            "Complete the first step".into(),
            "Review progress and plan the next session".into(),
        ],
    }
}
