//! Dashboard aggregation relays.
//!
//! These feed read-only dashboard widgets; an unreachable ERP degrades to
//! an empty list rather than an error so one dead backend does not blank
//! the whole dashboard.

use axum::extract::State;
use axum::Json;
use serde_json::Value;
use std::sync::Arc;

use crate::state::AppState;

async fn fetch_or_empty(state: &AppState, path: &str) -> Json<Value> {
    let url = state.proxy.erp_url(path);
    match state.proxy.get_json(&url).await {
        Ok(value) => Json(value),
        Err(err) => {
            tracing::warn!(error = %err, path, "dashboard upstream fetch failed");
            Json(Value::Array(Vec::new()))
        }
    }
}

pub async fn projects(State(state): State<Arc<AppState>>) -> Json<Value> {
    fetch_or_empty(&state, "/api/projects").await
}

pub async fn customers(State(state): State<Arc<AppState>>) -> Json<Value> {
    fetch_or_empty(&state, "/api/customers").await
}

pub async fn materials(State(state): State<Arc<AppState>>) -> Json<Value> {
    fetch_or_empty(&state, "/api/materials").await
}

pub async fn purchase_orders(State(state): State<Arc<AppState>>) -> Json<Value> {
    fetch_or_empty(&state, "/api/purchaseOrders").await
}

pub async fn project_plans(State(state): State<Arc<AppState>>) -> Json<Value> {
    fetch_or_empty(&state, "/api/project_plans").await
}

pub async fn sales_orders(State(state): State<Arc<AppState>>) -> Json<Value> {
    fetch_or_empty(&state, "/api/sales_orders").await
}

pub async fn employees(State(state): State<Arc<AppState>>) -> Json<Value> {
    fetch_or_empty(&state, "/api/employees").await
}
