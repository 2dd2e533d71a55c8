use sinkhole_domain::{parse_list_domain, DomainError};
use std::sync::Arc;
use tracing::{info, instrument};

use super::evict;
use crate::ports::{DnsCachePort, DomainListRepository};

pub struct AllowDomainUseCase {
    repo: Arc<dyn DomainListRepository>,
    cache: Arc<dyn DnsCachePort>,
}

impl AllowDomainUseCase {
    pub fn new(repo: Arc<dyn DomainListRepository>, cache: Arc<dyn DnsCachePort>) -> Self {
        Self { repo, cache }
    }

    /// Persists the allow entry and evicts any cached decision so the next
    /// query goes upstream.
    #[instrument(skip(self))]
    pub async fn execute(&self, domain: &str) -> Result<String, DomainError> {
        let domain = parse_list_domain(domain)?;

        self.repo.allow_domain(&domain).await?;
        let evicted = evict(self.cache.as_ref(), &domain);

        info!(domain = %domain, evicted, "Domain allowed");
        Ok(domain)
    }
}
