use ai_llm_service::AiLlmError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use structurer::StructurerError;
use thiserror::Error;
use tracing::warn;

/// Public application error type.
///
/// Every error raised while handling a request renders as
/// `400 { "error": <message> }`; the variant only drives logging.
/// Routing misses keep their own status (404/405) with the same body.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error(transparent)]
    Startup(AiLlmError),

    // --- IO / network / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request cycle ---
    /// Required secret missing; no upstream call was made.
    #[error("{0}")]
    Configuration(String),

    /// Missing/empty input field or unparsable body.
    #[error("{0}")]
    BadRequest(String),

    /// Provider answered with a non-success status.
    #[error("{0}")]
    Upstream(String),

    /// Provider envelope or model text unusable.
    #[error("{0}")]
    MalformedUpstreamPayload(String),

    /// Anything else (transport failures, serialization).
    #[error("{0}")]
    Internal(String),

    #[error("not found")]
    NotFound,

    #[error("method not allowed")]
    MethodNotAllowed,
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Configuration(_)
            | AppError::BadRequest(_)
            | AppError::Upstream(_)
            | AppError::MalformedUpstreamPayload(_)
            | AppError::Internal(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            // startup-only
            AppError::Startup(_) | AppError::Bind(_) | AppError::Server(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Startup(_) => "CONFIG_ERROR",
            AppError::Bind(_) => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Upstream(_) => "UPSTREAM_ERROR",
            AppError::MalformedUpstreamPayload(_) => "MALFORMED_UPSTREAM_PAYLOAD",
            AppError::Internal(_) => "INTERNAL_ERROR",
            AppError::NotFound => "NOT_FOUND",
            AppError::MethodNotAllowed => "METHOD_NOT_ALLOWED",
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();
        warn!(code = self.error_code(), %status, %message, "request failed");
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

impl From<axum::extract::rejection::QueryRejection> for AppError {
    fn from(err: axum::extract::rejection::QueryRejection) -> Self {
        AppError::BadRequest(err.body_text())
    }
}

impl From<axum::extract::rejection::BytesRejection> for AppError {
    fn from(err: axum::extract::rejection::BytesRejection) -> Self {
        AppError::BadRequest(err.body_text())
    }
}

impl From<StructurerError> for AppError {
    fn from(err: StructurerError) -> Self {
        match err {
            StructurerError::MissingField(_) | StructurerError::InvalidBody(_) => {
                AppError::BadRequest(err.to_string())
            }
            StructurerError::InvalidModelJson(_) | StructurerError::Nonconforming { .. } => {
                AppError::MalformedUpstreamPayload(err.to_string())
            }
            StructurerError::Serialize(_) => AppError::Internal(err.to_string()),
        }
    }
}

impl From<AiLlmError> for AppError {
    fn from(err: AiLlmError) -> Self {
        match err {
            AiLlmError::Config(_) => AppError::Configuration(err.to_string()),
            AiLlmError::HttpStatus(_) => AppError::Upstream(err.to_string()),
            AiLlmError::Decode(_) => AppError::MalformedUpstreamPayload(err.to_string()),
            _ => AppError::Internal(err.to_string()),
        }
    }
}
