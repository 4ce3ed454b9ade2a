//! ERP inventory relay.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;
use std::sync::Arc;

use crate::error::GatewayError;
use crate::state::AppState;

pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Value>, GatewayError> {
    let url = state.proxy.erp_url("/api/inventory");
    Ok(Json(state.proxy.get_json(&url).await?))
}

pub async fn deduct(
    State(state): State<Arc<AppState>>,
    Json(request): Json<Value>,
) -> Result<StatusCode, GatewayError> {
    let url = state.proxy.erp_url("/api/inventory/deduct");
    state.proxy.post_json(&url, &request).await?;
    Ok(StatusCode::OK)
}

pub async fn restore(
    State(state): State<Arc<AppState>>,
    Json(request): Json<Value>,
) -> Result<StatusCode, GatewayError> {
    let url = state.proxy.erp_url("/api/inventory/restore");
    state.proxy.post_json(&url, &request).await?;
    Ok(StatusCode::OK)
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Json(request): Json<Value>,
) -> Result<StatusCode, GatewayError> {
    let url = state.proxy.erp_url("/api/inventory/update");
    state.proxy.put_json(&url, &request).await?;
    Ok(StatusCode::OK)
}
