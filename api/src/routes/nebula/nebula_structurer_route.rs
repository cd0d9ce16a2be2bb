use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
};
use serde_json::Value;
use tracing::instrument;

use crate::{core::app_state::AppState, error_handler::AppResult};

/// Handler: POST /ai_nebula_structurer
///
/// Body: `{ "raw_input": "..." }`. Responds with a project brief.
#[instrument(name = "nebula_structurer_route", skip_all)]
pub async fn nebula_structurer_route(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> AppResult<Json<Value>> {
    let body = body?;
    let brief = state.nebula_structurer.run(&body).await?;
    Ok(Json(brief))
}
