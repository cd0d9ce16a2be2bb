/// Configuration for a Gemini model invocation.
///
/// Built once at startup (see [`crate::config::default_config::config_gemini`])
/// or directly in tests, then handed to [`crate::services::gemini_service::GeminiService`].
///
/// # Examples
///
/// ```
/// use ai_llm_service::config::llm_model_config::LlmModelConfig;
///
/// let cfg = LlmModelConfig {
///     model: "gemini-2.0-flash".to_string(),
///     endpoint: "https://generativelanguage.googleapis.com".to_string(),
///     api_key: Some("AIza...".to_string()),
///     max_tokens: None,
///     temperature: None,
/// };
/// assert!(cfg.has_api_key());
/// ```
#[derive(Clone, PartialEq)]
pub struct LlmModelConfig {
    /// Model identifier used as a path segment (e.g., `"gemini-2.0-flash"`).
    pub model: String,

    /// Base URL of the provider API, without the `/v1beta` suffix.
    pub endpoint: String,

    /// API key passed as the `key` query parameter. `None` means calls fail
    /// with a configuration error before touching the network.
    pub api_key: Option<String>,

    /// Maximum number of output tokens (`generationConfig.maxOutputTokens`).
    pub max_tokens: Option<u32>,

    /// Sampling temperature (`generationConfig.temperature`).
    pub temperature: Option<f32>,
}

impl LlmModelConfig {
    /// Returns `true` when a non-empty API key is configured.
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

// Hand-written so the key never ends up in logs via `{:?}`.
impl std::fmt::Debug for LlmModelConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmModelConfig")
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .finish()
    }
}
