//! Audit interceptor.
//!
//! Wraps every gateway route except the audit-query endpoint itself (so
//! reading logs never logs the read). Builds one record per cycle: trace
//! id and timestamp up front, summarized request body, whatever status and
//! summarized body came out of the pipeline, and the elapsed time. The
//! record is handed off unconditionally and the response is relayed
//! byte-for-byte, so the caller observes the same outcome with or without
//! this layer.

use axum::{
    body::{Body, Bytes},
    extract::{ConnectInfo, Request, State},
    http::header::CONTENT_TYPE,
    middleware::Next,
    response::Response,
};
use gantry_audit::{classify, summarize, AuditRecord};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use crate::state::AppState;

/// Paths under this prefix are exempt from auditing.
pub const LOGS_ENDPOINT: &str = "/gateway/logs";

pub async fn record_cycle(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {
    let path = req.uri().path().to_string();
    if path.starts_with(LOGS_ENDPOINT) {
        return next.run(req).await;
    }

    let started = Instant::now();
    let method = req.method().to_string();
    let builder = AuditRecord::builder(classify(&path), &path, &method)
        .client_addr(client_addr(&req));

    // Buffer the request body so it can be summarized and then replayed
    // into the handler.
    let (parts, body) = req.into_parts();
    let request_content_type = content_type(&parts.headers);
    let request_bytes = buffer(body).await;
    let request_summary = summarize(request_content_type.as_deref(), &request_bytes);
    let req = Request::from_parts(parts, Body::from(request_bytes));

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let (parts, body) = response.into_parts();
    let response_content_type = content_type(&parts.headers);
    let response_bytes = buffer(body).await;
    let response_summary = summarize(response_content_type.as_deref(), &response_bytes);

    let record = builder
        .request_payload(request_summary)
        .response_status(status)
        .response_payload(response_summary)
        .build();
    let trace_id = record.trace_id.clone();

    state.recorder.record(record).await;
    tracing::info!(
        "[{}] {} {} - {}ms",
        trace_id,
        method,
        path,
        started.elapsed().as_millis()
    );

    Response::from_parts(parts, Body::from(response_bytes))
}

async fn buffer(body: Body) -> Bytes {
    match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::error!(error = %err, "failed to buffer body for audit capture");
            Bytes::new()
        }
    }
}

fn content_type(headers: &axum::http::HeaderMap) -> Option<String> {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

fn client_addr(req: &Request) -> String {
    if let Some(forwarded) = req
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
    {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
