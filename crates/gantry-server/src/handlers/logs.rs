//! Audit record endpoints.
//!
//! The separate query path: read-all, newest first, plus an ingestion
//! endpoint other services can post completed records to. Both are exempt
//! from the audit interceptor so log traffic never logs itself.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use gantry_audit::AuditRecord;
use std::sync::Arc;

use crate::error::GatewayError;
use crate::state::AppState;

pub async fn list(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<AuditRecord>>, GatewayError> {
    Ok(Json(state.recorder.fetch_all().await?))
}

pub async fn ingest(
    State(state): State<Arc<AppState>>,
    Json(record): Json<AuditRecord>,
) -> StatusCode {
    state.recorder.record(record).await;
    StatusCode::CREATED
}
