use async_trait::async_trait;
use sinkhole_domain::{DomainError, ListEntry};

/// Persisted black/white lists. A domain has at most one entry; writing a
/// block over an allow (or the reverse) replaces it.
#[async_trait]
pub trait DomainListRepository: Send + Sync {
    async fn block_domain(&self, domain: &str) -> Result<(), DomainError>;

    /// Blocks every domain in one transaction, returns the number written.
    async fn block_many(&self, domains: &[String]) -> Result<u64, DomainError>;

    async fn allow_domain(&self, domain: &str) -> Result<(), DomainError>;

    /// Returns `false` when the domain was not listed.
    async fn remove_domain(&self, domain: &str) -> Result<bool, DomainError>;

    async fn find_domain(&self, domain: &str) -> Result<Option<ListEntry>, DomainError>;

    async fn blocked_domains(&self) -> Result<Vec<String>, DomainError>;

    async fn allowed_domains(&self) -> Result<Vec<String>, DomainError>;
}
