//! Gemini access for the mission AI backend.
//!
//! - [`config`]: model config and env loading
//! - [`services::gemini_service::GeminiService`]: one-shot JSON-mode generation
//! - [`health_service::HealthService`]: resilient reachability probe
//! - [`telemetry`]: tracing layer shared by the workspace binary

pub mod config {
    pub mod default_config;
    pub mod llm_model_config;
}

pub mod services {
    pub mod gemini_service;
}

pub mod error_handler;
pub mod health_service;
pub mod telemetry;

pub use config::llm_model_config::LlmModelConfig;
pub use error_handler::{AiLlmError, ConfigError};
pub use services::gemini_service::GeminiService;
