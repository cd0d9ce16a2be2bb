//! Gemini service for JSON-mode text generation.
//!
//! Minimal, non-streaming client around the Generative Language REST API:
//! - POST {endpoint}/v1beta/models/{model}:generateContent?key={api_key}
//!
//! The request always asks for `responseMimeType = application/json`; the
//! returned text is the raw model output and is *not* parsed here.
//!
//! The API key travels only as a query parameter. It is never logged and
//! never part of an error message.

use std::time::Instant;

use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::{
    config::llm_model_config::LlmModelConfig,
    error_handler::{AiLlmError, ConfigError, HttpError, make_snippet, validate_http_endpoint},
};

/// Thin client for Gemini `generateContent`.
///
/// Constructed from a [`LlmModelConfig`]. Internally keeps a preconfigured
/// `reqwest::Client`; clone-free sharing is done by wrapping it in `Arc`.
#[derive(Debug)]
pub struct GeminiService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    url_generate: String,
}

impl GeminiService {
    /// Creates a new [`GeminiService`] from the given config.
    ///
    /// The API key is deliberately not required here; see [`GeminiService::generate_json`].
    ///
    /// # Errors
    /// - [`AiLlmError::Config`] if the endpoint is not http/https or the model is empty
    /// - [`AiLlmError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self, AiLlmError> {
        let endpoint = cfg.endpoint.trim();
        validate_http_endpoint("GEMINI_ENDPOINT", endpoint)?;
        if cfg.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel.into());
        }

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        // No timeout: the reqwest default applies.
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        let base = endpoint.trim_end_matches('/');
        let url_generate = format!("{}/v1beta/models/{}:generateContent", base, cfg.model);

        info!(
            model = %cfg.model,
            endpoint = %cfg.endpoint,
            has_api_key = cfg.has_api_key(),
            "GeminiService initialized"
        );

        Ok(Self {
            client,
            cfg,
            url_generate,
        })
    }

    /// Model configuration this service was built with.
    pub fn config(&self) -> &LlmModelConfig {
        &self.cfg
    }

    /// Performs a single **non-streaming** `generateContent` call in JSON mode
    /// and returns `candidates[0].content.parts[0].text`.
    ///
    /// One attempt is made; there is no retry.
    ///
    /// # Errors
    /// - [`AiLlmError::Config`] with `MissingVar("GEMINI_API_KEY")` before any network I/O
    /// - [`AiLlmError::HttpStatus`] for non-2xx responses (status + body snippet)
    /// - [`AiLlmError::HttpTransport`] for client/network failures
    /// - [`AiLlmError::Decode`] if the envelope lacks the nested text field
    pub async fn generate_json(&self, prompt: &str) -> Result<String, AiLlmError> {
        let api_key = self
            .cfg
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingVar("GEMINI_API_KEY"))?;

        let started = Instant::now();
        let body = GenerateContentRequest::from_cfg(&self.cfg, prompt);

        debug!(
            model = %self.cfg.model,
            prompt_len = prompt.len(),
            "POST {}", self.url_generate
        );

        let resp = self
            .client
            .post(&self.url_generate)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_generate.clone();
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);

            error!(
                %status,
                %url,
                %snippet,
                model = %self.cfg.model,
                latency_ms = started.elapsed().as_millis(),
                "Gemini generateContent returned non-success status"
            );

            return Err(AiLlmError::HttpStatus(HttpError {
                status,
                url,
                snippet,
            }));
        }

        let out: GenerateContentResponse = match resp.json().await {
            Ok(v) => v,
            Err(e) => {
                let e = e.without_url();
                error!(
                    error = %e,
                    model = %self.cfg.model,
                    latency_ms = started.elapsed().as_millis(),
                    "failed to decode generateContent response"
                );
                return Err(AiLlmError::Decode(format!(
                    "expected `candidates[0].content.parts[0].text`: {e}"
                )));
            }
        };

        let text = out.first_text().ok_or_else(|| {
            AiLlmError::Decode("missing `candidates[0].content.parts[0].text`".into())
        })?;

        info!(
            model = %self.cfg.model,
            latency_ms = started.elapsed().as_millis(),
            output_len = text.len(),
            "generateContent completed"
        );

        Ok(text)
    }
}

/* ===========================================================================
HTTP payloads
======================================================================== */

/// Request body for `:generateContent`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

impl<'a> GenerateContentRequest<'a> {
    fn from_cfg(cfg: &LlmModelConfig, prompt: &'a str) -> Self {
        Self {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                temperature: cfg.temperature,
                max_output_tokens: cfg.max_tokens,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

/// Minimal response envelope; every level is optional so that a shape
/// mismatch becomes a `Decode` error rather than a serde failure.
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<PartOut>,
}

#[derive(Debug, Deserialize)]
struct PartOut {
    text: Option<String>,
}

impl GenerateContentResponse {
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
    }
}
