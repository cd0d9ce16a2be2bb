//! One parameterized transformation shared by every endpoint.
//!
//! A [`Blueprint`] bundles everything that differs between endpoints: the
//! input field, the prompt template, the mock synthesizer and the typed
//! response shape. The HTTP layer runs the same pipeline for all of them.

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::debug;

use crate::{
    errors::{Result, StructurerError},
    models::{
        InputRequest,
        mission_plan::{MISSION_PLAN_PROMPT, MissionPlan, MissionPlanRequest, mock_mission_plan},
        project_brief::{NEBULA_PROMPT, NebulaRequest, ProjectBrief, mock_project_brief},
    },
    prompt::PromptTemplate,
};

pub struct Blueprint {
    /// Short name used in logs and error messages.
    pub name: &'static str,
    /// Name of the required request field.
    pub input_field: &'static str,
    pub template: PromptTemplate,
    extract: fn(&[u8]) -> Result<String>,
    mock: fn(&str) -> Result<Value>,
    conform: fn(&Value) -> std::result::Result<(), serde_json::Error>,
}

pub static MISSION_PLAN: Blueprint = Blueprint {
    name: "mission_plan",
    input_field: MissionPlanRequest::FIELD,
    template: MISSION_PLAN_PROMPT,
    extract: extract_input::<MissionPlanRequest>,
    mock: |idea| to_value(mock_mission_plan(idea)),
    conform: conforms_to::<MissionPlan>,
};

pub static NEBULA_STRUCTURER: Blueprint = Blueprint {
    name: "nebula_structurer",
    input_field: NebulaRequest::FIELD,
    template: NEBULA_PROMPT,
    extract: extract_input::<NebulaRequest>,
    mock: |raw| to_value(mock_project_brief(raw)),
    conform: conforms_to::<ProjectBrief>,
};

impl Blueprint {
    /// Parses the raw request body and returns the required text field.
    ///
    /// # Errors
    /// - [`StructurerError::InvalidBody`] if the body is not a JSON object of the request shape
    /// - [`StructurerError::MissingField`] if the field is absent or blank
    pub fn parse_input(&self, body: &[u8]) -> Result<String> {
        (self.extract)(body)
    }

    pub fn build_prompt(&self, input: &str) -> String {
        self.template.render(input)
    }

    /// Deterministic, network-free response for `input`.
    pub fn mock_response(&self, input: &str) -> Result<Value> {
        (self.mock)(input)
    }

    /// Parses model text as JSON and, when `strict`, checks it against the typed shape.
    ///
    /// The returned document is the parsed model output, unchanged.
    pub fn parse_output(&self, text: &str, strict: bool) -> Result<Value> {
        let value: Value = serde_json::from_str(text).map_err(StructurerError::InvalidModelJson)?;
        if strict {
            (self.conform)(&value).map_err(|e| StructurerError::Nonconforming {
                blueprint: self.name,
                reason: e.to_string(),
            })?;
            debug!(blueprint = self.name, "model output conforms to schema");
        }
        Ok(value)
    }
}

impl std::fmt::Debug for Blueprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Blueprint")
            .field("name", &self.name)
            .field("input_field", &self.input_field)
            .finish_non_exhaustive()
    }
}

fn extract_input<R: InputRequest>(body: &[u8]) -> Result<String> {
    let req: R = serde_json::from_slice(body).map_err(StructurerError::InvalidBody)?;
    req.into_input()
        .filter(|s| !s.trim().is_empty())
        .ok_or(StructurerError::MissingField(R::FIELD))
}

fn conforms_to<T: DeserializeOwned>(value: &Value) -> std::result::Result<(), serde_json::Error> {
    T::deserialize(value).map(|_| ())
}

fn to_value<T: Serialize>(v: T) -> Result<Value> {
    serde_json::to_value(v).map_err(StructurerError::Serialize)
}
