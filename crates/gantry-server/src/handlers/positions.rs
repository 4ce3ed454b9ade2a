//! ERP position relay.

use axum::extract::State;
use axum::Json;
use serde_json::Value;
use std::sync::Arc;

use crate::error::GatewayError;
use crate::state::AppState;

pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Value>, GatewayError> {
    let url = state.proxy.erp_url("/api/positions");
    Ok(Json(state.proxy.get_json(&url).await?))
}
