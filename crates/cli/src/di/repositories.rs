use sinkhole_application::ports::{DomainListRepository, QueryLogRepository};
use sinkhole_domain::config::DatabaseConfig;
use sinkhole_infrastructure::repositories::{
    DiscardQueryLogRepository, SqliteDomainListRepository, SqliteQueryLogRepository,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::info;

pub struct Repositories {
    pub query_log: Arc<dyn QueryLogRepository>,
    pub domain_list: Arc<dyn DomainListRepository>,
}

impl Repositories {
    pub fn new(pool: SqlitePool, cfg: &DatabaseConfig) -> Self {
        let query_log: Arc<dyn QueryLogRepository> = if cfg.query_log_enabled {
            Arc::new(SqliteQueryLogRepository::new(pool.clone(), cfg))
        } else {
            info!("Query log disabled");
            Arc::new(DiscardQueryLogRepository)
        };

        Self {
            query_log,
            domain_list: Arc::new(SqliteDomainListRepository::new(pool)),
        }
    }
}
