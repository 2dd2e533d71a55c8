use compact_str::{CompactString, ToCompactString};
use sinkhole_domain::QueryLog;
use sqlx::SqlitePool;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

const COLS_PER_ROW: usize = 6;
const ROWS_PER_CHUNK: usize = 999 / COLS_PER_ROW;

pub(super) struct QueryLogEntry {
    domain: CompactString,
    record_type: CompactString,
    client_ip: CompactString,
    cache_hit: bool,
    blocked: bool,
    created_at: String,
}

impl QueryLogEntry {
    pub fn from_query_log(q: &QueryLog) -> Self {
        Self {
            domain: CompactString::from(q.domain.as_ref()),
            record_type: q.record_type.to_compact_string(),
            client_ip: q.client_ip.to_compact_string(),
            cache_hit: q.cache_hit,
            blocked: q.blocked,
            created_at: q.timestamp.to_rfc3339(),
        }
    }
}

fn build_multi_insert_sql(n: usize) -> String {
    debug_assert!(n > 0 && n <= ROWS_PER_CHUNK);
    const HEADER: &str = "INSERT INTO query_log \
        (domain, record_type, client_ip, cache_hit, blocked, created_at) VALUES ";
    const PLACEHOLDER: &str = "(?,?,?,?,?,?)";
    let mut sql = String::with_capacity(HEADER.len() + n * (PLACEHOLDER.len() + 1));
    sql.push_str(HEADER);
    for i in 0..n {
        if i > 0 {
            sql.push(',');
        }
        sql.push_str(PLACEHOLDER);
    }
    sql
}

/// Drains the channel into the database until every sender is dropped.
pub(super) async fn flush_loop(
    pool: SqlitePool,
    mut receiver: mpsc::Receiver<QueryLogEntry>,
    max_batch_size: usize,
    flush_interval_ms: u64,
) {
    let max_batch_size = max_batch_size.max(1);
    let mut batch: Vec<QueryLogEntry> = Vec::with_capacity(max_batch_size);
    let mut flush_interval =
        tokio::time::interval(Duration::from_millis(flush_interval_ms.max(1)));

    loop {
        tokio::select! {
            maybe_entry = receiver.recv() => {
                match maybe_entry {
                    Some(entry) => {
                        batch.push(entry);
                        while batch.len() < max_batch_size {
                            match receiver.try_recv() {
                                Ok(e) => batch.push(e),
                                Err(_) => break,
                            }
                        }
                        if batch.len() >= max_batch_size {
                            flush_batch(&pool, &mut batch).await;
                        }
                    }
                    None => {
                        flush_batch(&pool, &mut batch).await;
                        info!("Query log flush task shutting down");
                        return;
                    }
                }
            }
            _ = flush_interval.tick() => {
                flush_batch(&pool, &mut batch).await;
            }
        }
    }
}

async fn flush_batch(pool: &SqlitePool, batch: &mut Vec<QueryLogEntry>) {
    let count = batch.len();
    if count == 0 {
        return;
    }

    let mut tx = match pool.begin().await {
        Ok(tx) => tx,
        Err(e) => {
            error!(error = %e, count, "Failed to begin transaction for batch flush");
            batch.clear();
            return;
        }
    };

    let mut inserted = 0usize;

    for chunk in batch.chunks(ROWS_PER_CHUNK) {
        let sql = build_multi_insert_sql(chunk.len());
        let mut q = sqlx::query(&sql);
        for entry in chunk {
            q = q
                .bind(entry.domain.as_str())
                .bind(entry.record_type.as_str())
                .bind(entry.client_ip.as_str())
                .bind(entry.cache_hit)
                .bind(entry.blocked)
                .bind(entry.created_at.as_str());
        }
        match q.execute(&mut *tx).await {
            Ok(r) => inserted += r.rows_affected() as usize,
            Err(e) => {
                warn!(error = %e, chunk_size = chunk.len(), "Failed to insert query log chunk");
            }
        }
    }

    match tx.commit().await {
        Ok(_) => debug!(count = inserted, "Query log batch flushed"),
        Err(e) => error!(error = %e, count, "Failed to commit query log batch"),
    }

    batch.clear();
}
