//! Audit record type.
//!
//! One record describes one request/response cycle through the gateway.
//! The record is built up while the request is in flight and becomes
//! immutable once handed to the recorder.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An audit record for a single request/response cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Opaque identifier correlating this cycle across logs.
    #[serde(default = "new_trace_id")]
    pub trace_id: String,

    /// Logical downstream service the request targeted.
    pub service_name: String,

    /// Request path, without the query string.
    pub endpoint: String,

    /// HTTP method, e.g. "GET".
    pub http_method: String,

    /// Address of the requesting client.
    #[serde(default = "unknown_client")]
    pub client_addr: String,

    /// Summarized request body, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_payload: Option<String>,

    /// HTTP status of the response.
    pub response_status: u16,

    /// Summarized response body, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_payload: Option<String>,

    /// Server-assigned creation time; immutable once persisted.
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

fn new_trace_id() -> String {
    Uuid::new_v4().to_string()
}

fn unknown_client() -> String {
    "unknown".to_string()
}

impl AuditRecord {
    /// Start a builder for a record. The trace ID and creation time are
    /// assigned here, before any downstream work happens.
    pub fn builder(
        service_name: impl Into<String>,
        endpoint: impl Into<String>,
        http_method: impl Into<String>,
    ) -> AuditRecordBuilder {
        AuditRecordBuilder {
            record: AuditRecord {
                trace_id: new_trace_id(),
                service_name: service_name.into(),
                endpoint: endpoint.into(),
                http_method: http_method.into(),
                client_addr: unknown_client(),
                request_payload: None,
                response_status: 200,
                response_payload: None,
                created_at: Utc::now(),
            },
        }
    }
}

/// Builder for an in-flight audit record.
///
/// The interceptor holds the builder across the wrapped handler call and
/// finishes it with the response fields.
#[derive(Debug)]
pub struct AuditRecordBuilder {
    record: AuditRecord,
}

impl AuditRecordBuilder {
    /// The trace ID assigned to the record under construction.
    pub fn trace_id(&self) -> &str {
        &self.record.trace_id
    }

    pub fn client_addr(mut self, addr: impl Into<String>) -> Self {
        self.record.client_addr = addr.into();
        self
    }

    pub fn request_payload(mut self, summary: Option<String>) -> Self {
        self.record.request_payload = summary;
        self
    }

    pub fn response_status(mut self, status: u16) -> Self {
        self.record.response_status = status;
        self
    }

    pub fn response_payload(mut self, summary: Option<String>) -> Self {
        self.record.response_payload = summary;
        self
    }

    pub fn build(self) -> AuditRecord {
        self.record
    }
}
