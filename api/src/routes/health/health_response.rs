use ai_llm_service::health_service::HealthStatus;
use serde::{Deserialize, Serialize};

/// Query for GET /health.
#[derive(Debug, Default, Deserialize)]
pub struct HealthQuery {
    /// When `true` and the endpoints are live, probe Gemini as well.
    #[serde(default)]
    pub probe: bool,
}

/// Response payload for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model: String,
    pub handlers: Vec<HandlerHealth>,
    /// Present only when a probe was requested and performed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream: Option<HealthStatus>,
}

#[derive(Debug, Serialize)]
pub struct HandlerHealth {
    pub name: &'static str,
    pub input_field: &'static str,
    /// `live` or `mock`.
    pub strategy: &'static str,
}
