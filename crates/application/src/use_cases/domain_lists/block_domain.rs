use sinkhole_domain::{parse_list_domain, DomainError};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{sinkhole, SinkholeAddresses};
use crate::ports::{DnsCachePort, DomainListRepository};

pub struct BlockDomainUseCase {
    repo: Arc<dyn DomainListRepository>,
    cache: Arc<dyn DnsCachePort>,
    addresses: SinkholeAddresses,
}

impl BlockDomainUseCase {
    pub fn new(
        repo: Arc<dyn DomainListRepository>,
        cache: Arc<dyn DnsCachePort>,
        addresses: SinkholeAddresses,
    ) -> Self {
        Self {
            repo,
            cache,
            addresses,
        }
    }

    /// Persists the block and sinkholes the domain in both families.
    /// Replaces an existing allow entry.
    #[instrument(skip(self))]
    pub async fn execute(&self, domain: &str) -> Result<String, DomainError> {
        let domain = parse_list_domain(domain)?;

        self.repo.block_domain(&domain).await?;
        sinkhole(self.cache.as_ref(), &domain, self.addresses);

        info!(domain = %domain, "Domain blocked");
        Ok(domain)
    }
}
