mod writer;

use async_trait::async_trait;
use sinkhole_application::ports::QueryLogRepository;
use sinkhole_domain::{config::DatabaseConfig, DomainError, QueryLog};
use sqlx::{Row, SqlitePool};
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use writer::QueryLogEntry;

/// Batched query log. Entries go through a bounded channel to a background
/// flush task; a full channel drops the newest entry.
pub struct SqliteQueryLogRepository {
    pool: SqlitePool,
    sender: mpsc::Sender<QueryLogEntry>,
}

impl SqliteQueryLogRepository {
    /// Spawns the flush task, so this must run inside a tokio runtime.
    pub fn new(pool: SqlitePool, cfg: &DatabaseConfig) -> Self {
        let channel_capacity = cfg.query_log_channel_capacity.max(1);
        let max_batch_size = cfg.query_log_max_batch_size;
        let flush_interval_ms = cfg.query_log_flush_interval_ms;

        let (sender, receiver) = mpsc::channel(channel_capacity);

        let flush_pool = pool.clone();
        tokio::spawn(async move {
            writer::flush_loop(flush_pool, receiver, max_batch_size, flush_interval_ms).await;
        });

        info!(
            channel_capacity,
            batch_size = max_batch_size,
            flush_interval_ms,
            "Query log batching enabled"
        );

        Self { pool, sender }
    }

    /// Number of persisted entries, newest flush included.
    pub async fn count(&self) -> Result<u64, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM query_log")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;
        Ok(row.get::<i64, _>("total") as u64)
    }
}

#[async_trait]
impl QueryLogRepository for SqliteQueryLogRepository {
    async fn log_query(&self, query: &QueryLog) -> Result<(), DomainError> {
        self.sender
            .send(QueryLogEntry::from_query_log(query))
            .await
            .map_err(|_| DomainError::DatabaseError("Query log channel closed".to_string()))
    }

    fn log_query_sync(&self, query: &QueryLog) -> Result<(), DomainError> {
        let entry = QueryLogEntry::from_query_log(query);
        match self.sender.try_send(entry) {
            Ok(()) => Ok(()),
            Err(mpsc::error::TrySendError::Full(_)) => {
                warn!("Query log channel full, dropping entry");
                Ok(())
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                error!("Query log channel closed");
                Err(DomainError::DatabaseError(
                    "Query log channel closed".to_string(),
                ))
            }
        }
    }
}

/// Used when `database.query_log_enabled` is off.
pub struct DiscardQueryLogRepository;

#[async_trait]
impl QueryLogRepository for DiscardQueryLogRepository {
    async fn log_query(&self, _query: &QueryLog) -> Result<(), DomainError> {
        Ok(())
    }

    fn log_query_sync(&self, _query: &QueryLog) -> Result<(), DomainError> {
        Ok(())
    }
}
