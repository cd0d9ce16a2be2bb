//! Health probe for the Gemini backend.
//!
//! Probe: `GET {endpoint}/v1beta/models/{model}?key=...`.
//!
//! The returned [`HealthStatus`] is JSON-serializable and suitable for a `/health` endpoint.
//! [`HealthService::check`] is resilient and never fails (errors mapped to `ok=false`).
//! [`HealthService::try_probe_gemini`] returns a strict `Result`.

use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::config::llm_model_config::LlmModelConfig;
use crate::error_handler::{AiLlmError, ConfigError, HttpError, make_snippet};

/// A serializable health snapshot for a single config.
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    /// Target endpoint base URL.
    pub endpoint: String,
    /// Model identifier relevant to the probe.
    pub model: String,
    /// Overall health flag.
    pub ok: bool,
    /// Measured HTTP latency in milliseconds for the probe.
    pub latency_ms: u128,
    /// Short human-readable message with details.
    pub message: String,
}

impl HealthStatus {
    #[inline]
    fn new(cfg: &LlmModelConfig, ok: bool, latency_ms: u128, message: impl Into<String>) -> Self {
        Self {
            endpoint: cfg.endpoint.clone(),
            model: cfg.model.clone(),
            ok,
            latency_ms,
            message: message.into(),
        }
    }
}

/// Health checker that reuses a single HTTP client.
///
/// Unlike generation calls, probes use a short client timeout so that a
/// `/health` request cannot hang.
#[derive(Debug)]
pub struct HealthService {
    client: reqwest::Client,
}

impl HealthService {
    /// Creates a new health service with an optional client timeout (seconds, default 10).
    ///
    /// # Errors
    /// Returns [`AiLlmError::HttpTransport`] if the HTTP client cannot be built.
    pub fn new(timeout_secs: Option<u64>) -> Result<Self, AiLlmError> {
        let timeout = Duration::from_secs(timeout_secs.unwrap_or(10));
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        info!(
            default_timeout_secs = timeout.as_secs(),
            "HealthService initialized"
        );

        Ok(Self { client })
    }

    /// Checks health for a config. Never returns an error.
    pub async fn check(&self, cfg: &LlmModelConfig) -> HealthStatus {
        let start = Instant::now();
        match self.try_probe_gemini(cfg).await {
            Ok(status) => {
                info!(
                    endpoint = %status.endpoint,
                    model = %status.model,
                    ok = status.ok,
                    latency_ms = status.latency_ms,
                    "health probe completed"
                );
                status
            }
            Err(err) => {
                let status =
                    HealthStatus::new(cfg, false, start.elapsed().as_millis(), err.to_string());
                warn!(
                    endpoint = %status.endpoint,
                    model = %status.model,
                    latency_ms = status.latency_ms,
                    message = %status.message,
                    "health probe failed"
                );
                status
            }
        }
    }

    /// Strict Gemini probe. Returns an error on hard failures.
    ///
    /// - API key must be configured
    /// - `GET {endpoint}/v1beta/models/{model}` must return 2xx
    pub async fn try_probe_gemini(&self, cfg: &LlmModelConfig) -> Result<HealthStatus, AiLlmError> {
        let api_key = cfg
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingVar("GEMINI_API_KEY"))?;

        let url = format!(
            "{}/v1beta/models/{}",
            cfg.endpoint.trim_end_matches('/'),
            cfg.model
        );

        let start = Instant::now();
        debug!(endpoint = %cfg.endpoint, model = %cfg.model, "GET {}", url);

        let resp = self
            .client
            .get(&url)
            .query(&[("key", api_key)])
            .send()
            .await?;

        let latency = start.elapsed().as_millis();

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);

            error!(
                %url,
                %status,
                %snippet,
                latency_ms = latency,
                "health GET models/{{model}} returned non-success status"
            );

            return Err(AiLlmError::HttpStatus(HttpError {
                status,
                url,
                snippet,
            }));
        }

        Ok(HealthStatus::new(
            cfg,
            true,
            latency,
            "Gemini is reachable; model is available",
        ))
    }
}

#[cfg(test)]
mod tests {
    use axum::{Json, Router, http::StatusCode, routing::get};
    use serde_json::json;
    use tokio::net::TcpListener;

    use super::*;

    async fn spawn(status: StatusCode) -> String {
        let app = Router::new().route(
            "/v1beta/models/{model}",
            get(move || async move { (status, Json(json!({ "name": "models/x" }))) }),
        );
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn cfg(endpoint: String, key: Option<&str>) -> LlmModelConfig {
        LlmModelConfig {
            model: "gemini-2.0-flash".into(),
            endpoint,
            api_key: key.map(str::to_string),
            max_tokens: None,
            temperature: None,
        }
    }

    #[tokio::test]
    async fn healthy_upstream_reports_ok() {
        let base = spawn(StatusCode::OK).await;
        let svc = HealthService::new(Some(2)).unwrap();
        let status = svc.check(&cfg(base, Some("k"))).await;
        assert!(status.ok, "{}", status.message);
    }

    #[tokio::test]
    async fn failures_are_reported_not_raised() {
        let base = spawn(StatusCode::NOT_FOUND).await;
        let svc = HealthService::new(Some(2)).unwrap();

        let status = svc.check(&cfg(base.clone(), Some("k"))).await;
        assert!(!status.ok);
        assert!(status.message.contains("404"));

        let status = svc.check(&cfg(base, None)).await;
        assert!(!status.ok);
        assert!(status.message.contains("GEMINI_API_KEY"));
    }
}
