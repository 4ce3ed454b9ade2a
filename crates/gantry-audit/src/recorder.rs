//! Audit recorder.
//!
//! Facade the interceptor hands completed records to. Its write path never
//! raises: a failing store is reported through operational logging and
//! otherwise ignored, so audit problems cannot leak into the response the
//! client sees.

use std::sync::Arc;

use gantry_core::config::audit::AuditConfig;

use crate::error::AuditError;
use crate::record::AuditRecord;
use crate::storage::{create_storage, AuditStorage, NullStorage};

pub struct AuditRecorder {
    enabled: bool,
    storage: Arc<dyn AuditStorage>,
}

impl AuditRecorder {
    /// Build a recorder from configuration.
    pub async fn from_config(config: &AuditConfig) -> Result<Self, AuditError> {
        if !config.enabled {
            return Ok(Self::disabled());
        }
        let storage = create_storage(config).await?;
        Ok(Self {
            enabled: true,
            storage: storage.into(),
        })
    }

    /// Recorder with a custom storage backend.
    pub fn with_storage(storage: Arc<dyn AuditStorage>) -> Self {
        Self {
            enabled: true,
            storage,
        }
    }

    /// A no-op recorder.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            storage: Arc::new(NullStorage),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Persist a completed record. Storage failures are logged and
    /// swallowed; this call cannot fail.
    pub async fn record(&self, record: AuditRecord) {
        if !self.enabled {
            return;
        }

        tracing::debug!(
            trace_id = %record.trace_id,
            service = %record.service_name,
            endpoint = %record.endpoint,
            status = record.response_status,
            "audit record"
        );

        if let Err(err) = self.storage.store(record).await {
            tracing::error!(error = %err, "failed to persist audit record");
        }
    }

    /// All records, newest first. This is the separate query path; it is
    /// never called by the interceptor.
    pub async fn fetch_all(&self) -> Result<Vec<AuditRecord>, AuditError> {
        self.storage.fetch_all().await
    }
}
