use std::str::FromStr;

use ai_llm_service::{
    config::{default_config::config_gemini, llm_model_config::LlmModelConfig},
    error_handler::{AiLlmError, ConfigError, env_opt},
};

/// Which strategy the structuring endpoints use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LlmMode {
    /// Live when a Gemini key is configured, mock otherwise.
    #[default]
    Auto,
    /// Always call Gemini; a missing key fails each request.
    Live,
    /// Never touch the network.
    Mock,
}

impl FromStr for LlmMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "live" => Ok(Self::Live),
            "mock" => Ok(Self::Mock),
            _ => Err(ConfigError::InvalidFormat {
                var: "LLM_MODE",
                reason: "expected one of auto, live, mock",
            }),
        }
    }
}

/// Process configuration, read once in `main` and passed down explicitly.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listen address, e.g. `0.0.0.0:8080`.
    pub api_address: String,
    pub llm: LlmModelConfig,
    pub mode: LlmMode,
    /// Reject model output that does not deserialize into the typed response.
    pub strict_schema: bool,
}

pub const DEFAULT_API_ADDRESS: &str = "0.0.0.0:8080";

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// # Env
    /// - `API_ADDRESS` (default [`DEFAULT_API_ADDRESS`])
    /// - `LLM_MODE` = `auto` | `live` | `mock` (default `auto`)
    /// - `STRICT_SCHEMA` = `true`/`1` to enable schema checks
    /// - Gemini variables, see [`config_gemini`]
    pub fn from_env() -> Result<Self, AiLlmError> {
        let mode = match env_opt("LLM_MODE") {
            Some(v) => v.parse()?,
            None => LlmMode::default(),
        };

        Ok(Self {
            api_address: env_opt("API_ADDRESS").unwrap_or_else(|| DEFAULT_API_ADDRESS.into()),
            llm: config_gemini()?,
            mode,
            strict_schema: parse_flag(env_opt("STRICT_SCHEMA").as_deref())?,
        })
    }

    /// Whether requests go to Gemini, after resolving [`LlmMode::Auto`].
    pub fn is_live(&self) -> bool {
        match self.mode {
            LlmMode::Auto => self.llm.has_api_key(),
            LlmMode::Live => true,
            LlmMode::Mock => false,
        }
    }
}

fn parse_flag(value: Option<&str>) -> Result<bool, ConfigError> {
    match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        None | Some("0" | "false" | "no" | "off") => Ok(false),
        Some("1" | "true" | "yes" | "on") => Ok(true),
        Some(_) => Err(ConfigError::InvalidFormat {
            var: "STRICT_SCHEMA",
            reason: "expected a boolean",
        }),
    }
}
