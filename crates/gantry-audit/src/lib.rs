//! # gantry-audit
//!
//! Audit logging for the Gantry gateway.
//!
//! This crate provides functionality for:
//! - Building one [`AuditRecord`] per request/response cycle
//! - Classifying a request path into the logical downstream service
//! - Summarizing request/response payloads under size and type constraints
//! - Persisting records in files (JSON Lines), SQLite, console, or memory
//!
//! ## Record Format
//!
//! Records carry `[trace_id - service - endpoint - method - status]` plus
//! the summarized payloads and a server-assigned timestamp. File output is
//! JSON Lines (one object per line); the SQLite backend mirrors the same
//! fields in an `api_logs` table.
//!
//! ## Failure Policy
//!
//! The recorder never raises across the interception boundary: storage
//! failures are logged via `tracing` and swallowed, so a broken audit
//! store can never change the response a client sees.

pub mod classify;
pub mod error;
pub mod record;
pub mod recorder;
pub mod storage;
pub mod summary;

pub use classify::classify;
pub use error::AuditError;
pub use record::{AuditRecord, AuditRecordBuilder};
pub use recorder::AuditRecorder;
pub use storage::{
    AuditStorage, ConsoleStorage, FileStorage, MemoryStorage, NullStorage, SqliteStorage,
};
pub use summary::summarize;
