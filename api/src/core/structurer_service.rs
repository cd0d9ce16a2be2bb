//! Request → prompt → model (or mock) → JSON, shared by every structuring route.

use std::sync::Arc;

use ai_llm_service::GeminiService;
use serde_json::Value;
use structurer::Blueprint;
use tracing::{debug, info};

use crate::error_handler::AppResult;

/// How a structuring endpoint produces its answer. Fixed at construction.
#[derive(Debug, Clone)]
pub enum Strategy {
    /// Call Gemini and relay its JSON.
    Live(Arc<GeminiService>),
    /// Synthesize a deterministic answer without network I/O.
    Mock,
}

impl Strategy {
    pub fn label(&self) -> &'static str {
        match self {
            Strategy::Live(_) => "live",
            Strategy::Mock => "mock",
        }
    }
}

#[derive(Debug, Clone)]
pub struct StructurerService {
    blueprint: &'static Blueprint,
    strategy: Strategy,
    strict: bool,
}

impl StructurerService {
    pub fn new(blueprint: &'static Blueprint, strategy: Strategy, strict: bool) -> Self {
        Self {
            blueprint,
            strategy,
            strict,
        }
    }

    pub fn blueprint(&self) -> &'static Blueprint {
        self.blueprint
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    /// Runs the whole pipeline for one raw request body.
    pub async fn run(&self, body: &[u8]) -> AppResult<Value> {
        let input = self.blueprint.parse_input(body)?;
        debug!(
            blueprint = self.blueprint.name,
            strategy = self.strategy.label(),
            input_len = input.len(),
            "input accepted"
        );

        match &self.strategy {
            Strategy::Mock => Ok(self.blueprint.mock_response(&input)?),
            Strategy::Live(gemini) => {
                let prompt = self.blueprint.build_prompt(&input);
                let text = gemini.generate_json(&prompt).await?;
                let value = self.blueprint.parse_output(&text, self.strict)?;
                info!(blueprint = self.blueprint.name, "model output relayed");
                Ok(value)
            }
        }
    }
}
