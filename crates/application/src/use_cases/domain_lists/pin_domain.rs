use sinkhole_domain::{normalize_domain, AddressFamily, DomainError};
use std::net::IpAddr;
use std::sync::Arc;
use tracing::info;

use crate::ports::{DnsCachePort, PERMANENT};

/// Points a name at fixed addresses for the lifetime of the process.
pub struct PinDomainUseCase {
    cache: Arc<dyn DnsCachePort>,
}

impl PinDomainUseCase {
    pub fn new(cache: Arc<dyn DnsCachePort>) -> Self {
        Self { cache }
    }

    pub fn execute(&self, domain: &str, address: IpAddr) -> Result<(), DomainError> {
        let domain = normalize_domain(domain);
        if domain.is_empty() {
            return Err(DomainError::InvalidDomainName(domain));
        }

        let family = AddressFamily::of(&address);
        self.cache.put(family, &domain, address, PERMANENT)?;

        info!(domain = %domain, address = %address, "Pinned local record");
        Ok(())
    }
}
