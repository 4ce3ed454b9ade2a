//! ERP project plan relay.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;
use std::sync::Arc;

use crate::error::GatewayError;
use crate::state::AppState;

pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Value>, GatewayError> {
    let url = state.proxy.erp_url("/api/project_plans");
    Ok(Json(state.proxy.get_json(&url).await?))
}

/// Forward a progress-rate update for one plan.
pub async fn update_progress(
    State(state): State<Arc<AppState>>,
    Path(plan_id): Path<String>,
    Json(progress_rate): Json<Value>,
) -> Result<StatusCode, GatewayError> {
    let url = state
        .proxy
        .erp_url(&format!("/api/project_plans/{}/progress", plan_id));
    state.proxy.put_json(&url, &progress_rate).await?;
    Ok(StatusCode::OK)
}
