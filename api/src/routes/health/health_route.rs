use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use tracing::instrument;

use crate::{
    core::{
        app_state::AppState,
        structurer_service::{Strategy, StructurerService},
    },
    error_handler::AppResult,
    routes::health::health_response::{HandlerHealth, HealthQuery, HealthResponse},
};

fn handler_health(svc: &StructurerService) -> HandlerHealth {
    HandlerHealth {
        name: svc.blueprint().name,
        input_field: svc.blueprint().input_field,
        strategy: svc.strategy().label(),
    }
}

/// Handler: GET /health[?probe=true]
///
/// Always 200; upstream problems show up as `upstream.ok = false`.
#[instrument(name = "health_route", skip_all)]
pub async fn health_route(
    State(state): State<Arc<AppState>>,
    query: Result<Query<HealthQuery>, QueryRejection>,
) -> AppResult<Json<HealthResponse>> {
    let Query(query) = query?;
    let live = matches!(state.mission_plan.strategy(), Strategy::Live(_));
    let upstream = if query.probe && live {
        Some(state.health.check(&state.llm).await)
    } else {
        None
    };

    Ok(Json(HealthResponse {
        status: "ok",
        model: state.llm.model.clone(),
        handlers: vec![
            handler_health(&state.mission_plan),
            handler_health(&state.nebula_structurer),
        ],
        upstream,
    }))
}
