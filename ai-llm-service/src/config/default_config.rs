//! Default Gemini config loaded from environment variables.
//!
//! # Environment variables
//!
//! - `GEMINI_API_KEY`  = provider key (optional here; absence is reported per call)
//! - `GEMINI_MODEL`    = model name, default [`DEFAULT_GEMINI_MODEL`]
//! - `GEMINI_ENDPOINT` = base URL, default [`DEFAULT_GEMINI_ENDPOINT`]
//! - `LLM_MAX_TOKENS`  = optional max output tokens (u32)
//! - `LLM_TEMPERATURE` = optional temperature (`0.0..=2.0`)

use crate::{
    config::llm_model_config::LlmModelConfig,
    error_handler::{
        AiLlmError, ConfigError, env_opt, env_opt_f32, env_opt_u32, validate_http_endpoint,
        validate_range_f32,
    },
};

/// Model used when `GEMINI_MODEL` is not set.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Public Generative Language API base.
pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Constructs the Gemini config from the process environment.
///
/// A missing `GEMINI_API_KEY` is *not* an error at this stage: the service
/// reports it per request as a configuration error, and callers may choose
/// the mock strategy instead.
///
/// # Errors
/// - [`ConfigError::InvalidFormat`] if `GEMINI_ENDPOINT` is not http/https
/// - [`ConfigError::InvalidNumber`] if `LLM_MAX_TOKENS`/`LLM_TEMPERATURE` do not parse
/// - [`ConfigError::OutOfRange`] if the temperature is outside `0.0..=2.0`
pub fn config_gemini() -> Result<LlmModelConfig, AiLlmError> {
    let endpoint =
        env_opt("GEMINI_ENDPOINT").unwrap_or_else(|| DEFAULT_GEMINI_ENDPOINT.to_string());
    validate_http_endpoint("GEMINI_ENDPOINT", &endpoint)?;

    let model = env_opt("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());
    if model.trim().is_empty() {
        return Err(ConfigError::EmptyModel.into());
    }

    let temperature = env_opt_f32("LLM_TEMPERATURE")?;
    if let Some(t) = temperature {
        validate_range_f32("temperature", t, 0.0, 2.0)?;
    }

    Ok(LlmModelConfig {
        model,
        endpoint: endpoint.trim_end_matches('/').to_string(),
        api_key: env_opt("GEMINI_API_KEY"),
        max_tokens: env_opt_u32("LLM_MAX_TOKENS")?,
        temperature,
    })
}
