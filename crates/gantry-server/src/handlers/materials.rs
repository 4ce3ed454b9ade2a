//! ERP material relay.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;
use std::sync::Arc;

use crate::error::GatewayError;
use crate::state::AppState;

pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Value>, GatewayError> {
    let url = state.proxy.erp_url("/api/materials");
    Ok(Json(state.proxy.get_json(&url).await?))
}

pub async fn fetch(
    State(state): State<Arc<AppState>>,
    Path(material_id): Path<String>,
) -> Result<Json<Value>, GatewayError> {
    let url = state.proxy.erp_url(&format!("/api/materials/{}", material_id));
    Ok(Json(state.proxy.get_json(&url).await?))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, GatewayError> {
    let url = state.proxy.erp_url("/api/materials");
    Ok(Json(state.proxy.post_json(&url, &payload).await?))
}

pub async fn remove(
    State(state): State<Arc<AppState>>,
    Path(material_id): Path<String>,
) -> Result<StatusCode, GatewayError> {
    let url = state.proxy.erp_url(&format!("/api/materials/{}", material_id));
    state.proxy.delete(&url).await?;
    Ok(StatusCode::OK)
}
