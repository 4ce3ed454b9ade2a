//! ERP employee relay.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use crate::error::GatewayError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EmployeeQuery {
    /// Name filter; forwarded upstream as `employeeNm`.
    pub name: Option<String>,
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<EmployeeQuery>,
) -> Result<Json<Value>, GatewayError> {
    let url = state.proxy.erp_url("/api/employees");
    let value = match query.name.as_deref().filter(|n| !n.is_empty()) {
        Some(name) => {
            state
                .proxy
                .get_json_with_query(&url, &[("employeeNm", name)])
                .await?
        }
        None => state.proxy.get_json(&url).await?,
    };
    Ok(Json(value))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, GatewayError> {
    let url = state.proxy.erp_url("/api/employees");
    Ok(Json(state.proxy.post_json(&url, &payload).await?))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(employee_id): Path<String>,
    Json(payload): Json<Value>,
) -> Result<StatusCode, GatewayError> {
    let url = state.proxy.erp_url(&format!("/api/employees/{}", employee_id));
    state.proxy.put_json(&url, &payload).await?;
    Ok(StatusCode::OK)
}

pub async fn remove(
    State(state): State<Arc<AppState>>,
    Path(employee_id): Path<String>,
) -> Result<StatusCode, GatewayError> {
    let url = state.proxy.erp_url(&format!("/api/employees/{}", employee_id));
    state.proxy.delete(&url).await?;
    Ok(StatusCode::OK)
}
