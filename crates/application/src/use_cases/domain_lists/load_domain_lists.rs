use sinkhole_domain::DomainError;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;

use super::{sinkhole, SinkholeAddresses};
use crate::ports::{DnsCachePort, DomainListRepository};

/// Seeds the cache with permanent entries for every persisted block.
pub struct LoadDomainListsUseCase {
    repo: Arc<dyn DomainListRepository>,
    cache: Arc<dyn DnsCachePort>,
    addresses: SinkholeAddresses,
}

impl LoadDomainListsUseCase {
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

    /// Returns the number of domains sinkholed.
    pub async fn execute(&self) -> Result<usize, DomainError> {
        let allowed: HashSet<String> = self.repo.allowed_domains().await?.into_iter().collect();
        let blocked = self.repo.blocked_domains().await?;

        let mut loaded = 0;
        for domain in blocked.iter().filter(|d| !allowed.contains(*d)) {
            sinkhole(self.cache.as_ref(), domain, self.addresses);
            loaded += 1;
        }

        info!(
            blocked = loaded,
            allowed = allowed.len(),
            "Domain lists loaded into cache"
        );
        Ok(loaded)
    }
}
