//! ERP sales order relay.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use crate::error::GatewayError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesOrderQuery {
    pub customer_id: Option<String>,
    pub vessel_id: Option<String>,
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SalesOrderQuery>,
) -> Result<Json<Value>, GatewayError> {
    let url = state.proxy.erp_url("/api/sales_orders");
    // The ERP expects both parameters, empty when unused.
    let customer_id = query.customer_id.unwrap_or_default();
    let vessel_id = query.vessel_id.unwrap_or_default();
    let value = state
        .proxy
        .get_json_with_query(
            &url,
            &[("customerId", customer_id.as_str()), ("vesselId", vessel_id.as_str())],
        )
        .await?;
    Ok(Json(value))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, GatewayError> {
    let url = state.proxy.erp_url("/api/sales_orders");
    Ok(Json(state.proxy.post_json(&url, &payload).await?))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(sales_order_id): Path<String>,
    Json(payload): Json<Value>,
) -> Result<StatusCode, GatewayError> {
    let url = state
        .proxy
        .erp_url(&format!("/api/sales_orders/{}", sales_order_id));
    state.proxy.put_json(&url, &payload).await?;
    Ok(StatusCode::OK)
}

pub async fn remove(
    State(state): State<Arc<AppState>>,
    Path(sales_order_id): Path<String>,
) -> Result<StatusCode, GatewayError> {
    let url = state
        .proxy
        .erp_url(&format!("/api/sales_orders/{}", sales_order_id));
    state.proxy.delete(&url).await?;
    Ok(StatusCode::OK)
}
