//! Drone image relay.
//!
//! The by-id fetch relays the upstream's binary body and content type
//! unchanged; the audit interceptor is what turns those bytes into a
//! size note.

use axum::extract::{Multipart, Path, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;
use std::sync::Arc;

use crate::error::GatewayError;
use crate::state::AppState;

/// List image metadata from the drone server.
pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Value>, GatewayError> {
    let url = state.proxy.drone_url("/api/images");
    Ok(Json(state.proxy.get_json(&url).await?))
}

/// Relay one image's bytes, preserving upstream status and content type.
pub async fn fetch(
    State(state): State<Arc<AppState>>,
    Path(image_id): Path<i64>,
) -> Result<Response, GatewayError> {
    let url = state.proxy.drone_url(&format!("/api/images/{}", image_id));
    let (status, content_type, bytes) = state.proxy.get_raw(&url).await?;

    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut response = (status, bytes).into_response();
    if let Some(ct) = content_type {
        if let Ok(value) = HeaderValue::from_str(&ct) {
            response.headers_mut().insert(header::CONTENT_TYPE, value);
        }
    }
    Ok(response)
}

/// Relay a multipart image upload to the drone server, preserving the
/// original file name.
pub async fn upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Response, GatewayError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| GatewayError::UploadRelay(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("unknown").to_string();
        let content_type = field.content_type().map(|ct| ct.to_string());
        let data = field
            .bytes()
            .await
            .map_err(|e| GatewayError::UploadRelay(e.to_string()))?
            .to_vec();

        let url = state.proxy.drone_url("/api/images/upload");
        let (status, body) = state
            .proxy
            .post_multipart(&url, file_name, content_type, data)
            .await?;

        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return Ok((status, body).into_response());
    }

    Err(GatewayError::MissingFilePart)
}
