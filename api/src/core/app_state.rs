use std::sync::Arc;

use ai_llm_service::{
    GeminiService, config::llm_model_config::LlmModelConfig, health_service::HealthService,
};
use structurer::{MISSION_PLAN, NEBULA_STRUCTURER};
use tracing::info;

use crate::{
    core::{
        config::AppConfig,
        structurer_service::{Strategy, StructurerService},
    },
    error_handler::AppError,
};

/// Shared state for all HTTP handlers. Immutable after construction.
#[derive(Debug)]
pub struct AppState {
    pub mission_plan: StructurerService,
    pub nebula_structurer: StructurerService,
    pub health: HealthService,
    /// Gemini config, kept for the health probe.
    pub llm: LlmModelConfig,
}

impl AppState {
    /// Builds the state from explicit configuration.
    ///
    /// Both endpoints share one Gemini client in live mode.
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let strategy = if config.is_live() {
            let gemini = GeminiService::new(config.llm.clone()).map_err(AppError::Startup)?;
            Strategy::Live(Arc::new(gemini))
        } else {
            Strategy::Mock
        };

        info!(
            strategy = strategy.label(),
            model = %config.llm.model,
            strict_schema = config.strict_schema,
            "structuring endpoints configured"
        );

        Ok(Self {
            mission_plan: StructurerService::new(
                &MISSION_PLAN,
                strategy.clone(),
                config.strict_schema,
            ),
            nebula_structurer: StructurerService::new(
                &NEBULA_STRUCTURER,
                strategy,
                config.strict_schema,
            ),
            health: HealthService::new(None).map_err(AppError::Startup)?,
            llm: config.llm.clone(),
        })
    }
}
