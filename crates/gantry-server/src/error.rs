//! Gateway error type.
//!
//! Every handler failure surfaces to the client as a 500 with an
//! `{"error": <message>}` body, so the audit interceptor can summarize the
//! failure and the caller sees the same response whether or not the
//! interception layer is present.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// The downstream call itself failed (connect, timeout, non-2xx).
    #[error("downstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    /// The downstream answered with a body the gateway cannot relay.
    #[error("invalid downstream response: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    /// Reading the audit store failed.
    #[error("audit query failed: {0}")]
    Audit(#[from] gantry_audit::AuditError),

    /// An upload request without a "file" part.
    #[error("missing file part in upload")]
    MissingFilePart,

    /// Relaying a multipart upload failed.
    #[error("image upload relay failed: {0}")]
    UploadRelay(String),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request handling failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}
