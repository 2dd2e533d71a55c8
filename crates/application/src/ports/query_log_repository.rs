use async_trait::async_trait;
use sinkhole_domain::{DomainError, QueryLog};

#[async_trait]
pub trait QueryLogRepository: Send + Sync {
    async fn log_query(&self, query: &QueryLog) -> Result<(), DomainError>;

    /// Hands the entry off without waiting. Used from the resolution path.
    fn log_query_sync(&self, query: &QueryLog) -> Result<(), DomainError>;
}
