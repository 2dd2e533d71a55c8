use async_trait::async_trait;
use sinkhole_application::ports::DomainListRepository;
use sinkhole_domain::{DomainError, ListEntry};
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};

const UPSERT_SQL: &str = "INSERT INTO domain_list (domain, allow) VALUES (?, ?) \
     ON CONFLICT(domain) DO UPDATE SET allow = excluded.allow, added_at = datetime('now')";

fn db_error(e: sqlx::Error) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

pub struct SqliteDomainListRepository {
    pool: SqlitePool,
}

impl SqliteDomainListRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn upsert(&self, domain: &str, allow: bool) -> Result<(), DomainError> {
        sqlx::query(UPSERT_SQL)
            .bind(domain)
            .bind(allow)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        debug!(domain = %domain, allow, "Domain list entry written");
        Ok(())
    }

    async fn domains_where(&self, allow: bool) -> Result<Vec<String>, DomainError> {
        let rows = sqlx::query("SELECT domain FROM domain_list WHERE allow = ? ORDER BY domain")
            .bind(allow)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(rows.into_iter().map(|row| row.get("domain")).collect())
    }
}

#[async_trait]
impl DomainListRepository for SqliteDomainListRepository {
    async fn block_domain(&self, domain: &str) -> Result<(), DomainError> {
        self.upsert(domain, false).await
    }

    async fn block_many(&self, domains: &[String]) -> Result<u64, DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;
        let mut written = 0u64;

        for domain in domains {
            written += sqlx::query(UPSERT_SQL)
                .bind(domain.as_str())
                .bind(false)
                .execute(&mut *tx)
                .await
                .map_err(db_error)?
                .rows_affected();
        }

        tx.commit().await.map_err(db_error)?;
        info!(count = written, "Blocklist entries written");
        Ok(written)
    }

    async fn allow_domain(&self, domain: &str) -> Result<(), DomainError> {
        self.upsert(domain, true).await
    }

    async fn remove_domain(&self, domain: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM domain_list WHERE domain = ?")
            .bind(domain)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_domain(&self, domain: &str) -> Result<Option<ListEntry>, DomainError> {
        let row = sqlx::query("SELECT domain, allow FROM domain_list WHERE domain = ?")
            .bind(domain)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(row.map(|row| ListEntry {
            domain: row.get("domain"),
            allow: row.get("allow"),
        }))
    }

    async fn blocked_domains(&self) -> Result<Vec<String>, DomainError> {
        self.domains_where(false).await
    }

    async fn allowed_domains(&self) -> Result<Vec<String>, DomainError> {
        self.domains_where(true).await
    }
}
