mod allow_domain;
mod block_domain;
mod import_blocklist;
mod load_domain_lists;
mod pin_domain;
mod remove_domain;

pub use allow_domain::AllowDomainUseCase;
pub use block_domain::BlockDomainUseCase;
pub use import_blocklist::{parse_blocklist, ImportBlocklistUseCase, ImportSummary};
pub use load_domain_lists::LoadDomainListsUseCase;
pub use pin_domain::PinDomainUseCase;
pub use remove_domain::RemoveDomainUseCase;

use crate::ports::{DnsCachePort, PERMANENT};
use sinkhole_domain::AddressFamily;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use tracing::warn;

/// Addresses answered for blocked domains, one per family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkholeAddresses {
    pub ipv4: Ipv4Addr,
    pub ipv6: Ipv6Addr,
}

impl SinkholeAddresses {
    pub fn new(ipv4: Ipv4Addr, ipv6: Ipv6Addr) -> Self {
        Self { ipv4, ipv6 }
    }

    fn entries(&self) -> [(AddressFamily, IpAddr); 2] {
        [
            (AddressFamily::V4, IpAddr::V4(self.ipv4)),
            (AddressFamily::V6, IpAddr::V6(self.ipv6)),
        ]
    }
}

impl Default for SinkholeAddresses {
    fn default() -> Self {
        Self::new(Ipv4Addr::UNSPECIFIED, Ipv6Addr::UNSPECIFIED)
    }
}

fn sinkhole(cache: &dyn DnsCachePort, domain: &str, addresses: SinkholeAddresses) {
    for (family, address) in addresses.entries() {
        if let Err(e) = cache.put(family, domain, address, PERMANENT) {
            warn!(error = %e, domain = %domain, family = %family, "Failed to sinkhole domain");
        }
    }
}

fn evict(cache: &dyn DnsCachePort, domain: &str) -> bool {
    let v4 = cache.delete(AddressFamily::V4, domain);
    let v6 = cache.delete(AddressFamily::V6, domain);
    v4 || v6
}
