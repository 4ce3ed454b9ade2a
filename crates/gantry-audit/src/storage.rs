//! Audit storage backends.
//!
//! The store is append-only: records are written once and read back only
//! by the separate query path, newest first.

use crate::error::AuditError;
use crate::record::AuditRecord;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gantry_core::config::audit::{AuditConfig, StorageBackend};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use sqlx::Row;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Trait for audit storage backends.
#[async_trait]
pub trait AuditStorage: Send + Sync {
    /// Append a completed audit record.
    async fn store(&self, record: AuditRecord) -> Result<(), AuditError>;

    /// All stored records, newest first.
    async fn fetch_all(&self) -> Result<Vec<AuditRecord>, AuditError>;
}

/// Create a storage backend based on configuration.
pub async fn create_storage(config: &AuditConfig) -> Result<Box<dyn AuditStorage>, AuditError> {
    match config.backend {
        StorageBackend::Console => Ok(Box::new(ConsoleStorage)),
        StorageBackend::Memory => Ok(Box::new(MemoryStorage::new())),
        StorageBackend::File => {
            let mut path = PathBuf::from(&config.directory);
            std::fs::create_dir_all(&path)?;
            path.push("audit.log");
            Ok(Box::new(FileStorage::new(&path)?))
        }
        StorageBackend::Sqlite => {
            ensure_parent_dir(Path::new(&config.database_path))?;
            Ok(Box::new(SqliteStorage::connect(&config.database_path).await?))
        }
    }
}

fn ensure_parent_dir(path: &Path) -> Result<(), AuditError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// No-op storage used when auditing is disabled.
pub struct NullStorage;

#[async_trait]
impl AuditStorage for NullStorage {
    async fn store(&self, _record: AuditRecord) -> Result<(), AuditError> {
        Ok(())
    }

    async fn fetch_all(&self) -> Result<Vec<AuditRecord>, AuditError> {
        Ok(vec![])
    }
}

/// Console storage (one JSON line per record to stdout).
pub struct ConsoleStorage;

#[async_trait]
impl AuditStorage for ConsoleStorage {
    async fn store(&self, record: AuditRecord) -> Result<(), AuditError> {
        let json = serde_json::to_string(&record)?;
        println!("{}", json);
        Ok(())
    }

    async fn fetch_all(&self) -> Result<Vec<AuditRecord>, AuditError> {
        // Console storage doesn't support reading back
        Ok(vec![])
    }
}

/// In-memory storage, used by tests and short-lived processes.
pub struct MemoryStorage {
    records: RwLock<Vec<AuditRecord>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuditStorage for MemoryStorage {
    async fn store(&self, record: AuditRecord) -> Result<(), AuditError> {
        let mut records = self
            .records
            .write()
            .map_err(|e| AuditError::Storage(format!("failed to acquire write lock: {}", e)))?;
        records.push(record);
        Ok(())
    }

    async fn fetch_all(&self) -> Result<Vec<AuditRecord>, AuditError> {
        let records = self
            .records
            .read()
            .map_err(|e| AuditError::Storage(format!("failed to acquire read lock: {}", e)))?;
        Ok(records.iter().rev().cloned().collect())
    }
}

/// File storage: JSON Lines appended to a log file, with an in-memory
/// index for reads. Existing lines are replayed on open so reads survive
/// a restart.
pub struct FileStorage {
    path: PathBuf,
    records: RwLock<Vec<AuditRecord>>,
}

impl FileStorage {
    pub fn new(path: &Path) -> Result<Self, AuditError> {
        let mut records = Vec::new();
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            for line in contents.lines().filter(|l| !l.trim().is_empty()) {
                match serde_json::from_str::<AuditRecord>(line) {
                    Ok(record) => records.push(record),
                    Err(err) => {
                        tracing::warn!(error = %err, "skipping unreadable audit log line");
                    }
                }
            }
        }
        Ok(Self {
            path: path.to_path_buf(),
            records: RwLock::new(records),
        })
    }
}

#[async_trait]
impl AuditStorage for FileStorage {
    async fn store(&self, record: AuditRecord) -> Result<(), AuditError> {
        let json = serde_json::to_string(&record)?;

        use std::io::Write;
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", json)?;

        let mut records = self
            .records
            .write()
            .map_err(|e| AuditError::Storage(format!("failed to acquire write lock: {}", e)))?;
        records.push(record);
        Ok(())
    }

    async fn fetch_all(&self) -> Result<Vec<AuditRecord>, AuditError> {
        let records = self
            .records
            .read()
            .map_err(|e| AuditError::Storage(format!("failed to acquire read lock: {}", e)))?;
        Ok(records.iter().rev().cloned().collect())
    }
}

/// SQLite storage: an `api_logs` table, one row per record.
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    pub async fn connect(path: &str) -> Result<Self, AuditError> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS api_logs (
                log_id INTEGER PRIMARY KEY AUTOINCREMENT,
                trace_id TEXT NOT NULL,
                service_name TEXT NOT NULL,
                endpoint TEXT NOT NULL,
                http_method TEXT NOT NULL,
                client_addr TEXT NOT NULL,
                request_payload TEXT,
                response_status INTEGER NOT NULL,
                response_payload TEXT,
                created_at TEXT NOT NULL
            )",
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl AuditStorage for SqliteStorage {
    async fn store(&self, record: AuditRecord) -> Result<(), AuditError> {
        sqlx::query(
            "INSERT INTO api_logs (
                trace_id, service_name, endpoint, http_method, client_addr,
                request_payload, response_status, response_payload, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&record.trace_id)
        .bind(&record.service_name)
        .bind(&record.endpoint)
        .bind(&record.http_method)
        .bind(&record.client_addr)
        .bind(&record.request_payload)
        .bind(record.response_status as i64)
        .bind(&record.response_payload)
        .bind(record.created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn fetch_all(&self) -> Result<Vec<AuditRecord>, AuditError> {
        let rows = sqlx::query(
            "SELECT trace_id, service_name, endpoint, http_method, client_addr,
                    request_payload, response_status, response_payload, created_at
             FROM api_logs
             ORDER BY created_at DESC, log_id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                let created_raw: String = row.try_get("created_at")?;
                let created_at = DateTime::parse_from_rfc3339(&created_raw)
                    .map_err(|e| AuditError::Storage(format!("bad created_at: {}", e)))?
                    .with_timezone(&Utc);
                Ok(AuditRecord {
                    trace_id: row.try_get("trace_id")?,
                    service_name: row.try_get("service_name")?,
                    endpoint: row.try_get("endpoint")?,
                    http_method: row.try_get("http_method")?,
                    client_addr: row.try_get("client_addr")?,
                    request_payload: row.try_get("request_payload")?,
                    response_status: row.try_get::<i64, _>("response_status")? as u16,
                    response_payload: row.try_get("response_payload")?,
                    created_at,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(endpoint: &str, status: u16) -> AuditRecord {
        AuditRecord::builder("ERP Server", endpoint, "GET")
            .client_addr("127.0.0.1")
            .response_status(status)
            .build()
    }

    #[tokio::test]
    async fn memory_storage_returns_newest_first() {
        let storage = MemoryStorage::new();
        storage.store(sample("/gateway/employees", 200)).await.unwrap();
        storage.store(sample("/gateway/positions", 200)).await.unwrap();

        let records = storage.fetch_all().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].endpoint, "/gateway/positions");
        assert_eq!(records[1].endpoint, "/gateway/employees");
    }

    #[tokio::test]
    async fn file_storage_appends_and_replays() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.log");

        {
            let storage = FileStorage::new(&path).unwrap();
            storage.store(sample("/gateway/boms", 200)).await.unwrap();
            storage.store(sample("/gateway/boms", 500)).await.unwrap();
        }

        // A fresh handle sees the records written by the first one.
        let reopened = FileStorage::new(&path).unwrap();
        let records = reopened.fetch_all().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].response_status, 500);
    }

    #[tokio::test]
    async fn sqlite_storage_round_trips_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.sqlite");
        let storage = SqliteStorage::connect(path.to_str().unwrap()).await.unwrap();

        let mut record = sample("/gateway/drone-images/42", 200);
        record.response_payload = Some("Image byte data (size: 2048 bytes)".to_string());
        storage.store(record.clone()).await.unwrap();

        let records = storage.fetch_all().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].trace_id, record.trace_id);
        assert_eq!(
            records[0].response_payload.as_deref(),
            Some("Image byte data (size: 2048 bytes)")
        );
        assert_eq!(records[0].response_status, 200);
    }

    #[tokio::test]
    async fn null_storage_swallows_everything() {
        let storage = NullStorage;
        storage.store(sample("/x", 200)).await.unwrap();
        assert!(storage.fetch_all().await.unwrap().is_empty());
    }
}
