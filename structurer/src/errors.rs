use thiserror::Error;

/// Errors raised while turning input into a prompt or model output into a response.
#[derive(Debug, Error)]
pub enum StructurerError {
    /// Required input field is absent or blank.
    #[error("Missing '{0}' in request body.")]
    MissingField(&'static str),

    /// Request body is not a JSON object of the expected shape.
    #[error("Invalid JSON body: {0}")]
    InvalidBody(#[source] serde_json::Error),

    /// Model text was not valid JSON.
    #[error("Gemini returned invalid JSON: {0}")]
    InvalidModelJson(#[source] serde_json::Error),

    /// Model JSON did not match the declared response shape (strict mode only).
    #[error("Gemini response does not match the {blueprint} schema: {reason}")]
    Nonconforming {
        blueprint: &'static str,
        reason: String,
    },

    /// A mock response could not be serialized.
    #[error("failed to serialize mock response: {0}")]
    Serialize(#[source] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StructurerError>;
