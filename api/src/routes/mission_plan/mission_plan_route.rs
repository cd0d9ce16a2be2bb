//! POST /ai_mission_plan — turns an idea into a structured mission.

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
};
use serde_json::Value;
use tracing::instrument;

use crate::{core::app_state::AppState, error_handler::AppResult};

/// Handler: POST /ai_mission_plan
///
/// The body is taken as raw bytes so that a missing `Content-Type` or an
/// unparsable body both end up as the same `400 { "error": ... }`.
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8080/ai_mission_plan \
///   -H 'content-type: application/json' \
///   -d '{"idea":"Launch a podcast"}'
/// ```
#[instrument(name = "mission_plan_route", skip_all)]
pub async fn mission_plan_route(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> AppResult<Json<Value>> {
    let body = body?;
    let plan = state.mission_plan.run(&body).await?;
    Ok(Json(plan))
}
