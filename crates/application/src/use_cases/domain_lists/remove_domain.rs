use sinkhole_domain::{parse_list_domain, DomainError};
use std::sync::Arc;
use tracing::{info, instrument};

use super::evict;
use crate::ports::{DnsCachePort, DomainListRepository};

pub struct RemoveDomainUseCase {
    repo: Arc<dyn DomainListRepository>,
    cache: Arc<dyn DnsCachePort>,
}

impl RemoveDomainUseCase {
    pub fn new(repo: Arc<dyn DomainListRepository>, cache: Arc<dyn DnsCachePort>) -> Self {
        Self { repo, cache }
    }

    /// Drops the list entry and any cached decision. Returns whether the
    /// domain was listed.
    #[instrument(skip(self))]
    pub async fn execute(&self, domain: &str) -> Result<bool, DomainError> {
        let domain = parse_list_domain(domain)?;

        let removed = self.repo.remove_domain(&domain).await?;
        evict(self.cache.as_ref(), &domain);

        info!(domain = %domain, removed, "Domain removed from lists");
        Ok(removed)
    }
}
