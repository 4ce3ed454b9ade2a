//! MES shipment relay.

use axum::extract::{Path, State};
use axum::Json;
use serde_json::Value;
use std::sync::Arc;

use crate::error::GatewayError;
use crate::state::AppState;

pub async fn by_order(
    State(state): State<Arc<AppState>>,
    Path(sales_order_id): Path<String>,
) -> Result<Json<Value>, GatewayError> {
    let url = state
        .proxy
        .mes_url(&format!("/api/shipments/by-order/{}", sales_order_id));
    Ok(Json(state.proxy.get_json(&url).await?))
}
