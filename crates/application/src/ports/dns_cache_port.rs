use sinkhole_domain::{AddressFamily, DomainError};
use std::net::IpAddr;

/// TTL value that marks an entry as permanent.
pub const PERMANENT: u32 = 0;

/// A live cache hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheLookup {
    pub address: IpAddr,
    /// Entry was configured by hand (blocked or pinned) rather than learned.
    pub permanent: bool,
    /// Seconds left for learned entries, `None` for permanent ones.
    pub remaining_ttl: Option<u32>,
}

/// Address cache keyed by `(family, domain)`.
///
/// Domains are expected normalized (lower-case, no trailing dot). A permanent
/// entry is the only signal the resolver has that a domain is blocked.
pub trait DnsCachePort: Send + Sync {
    fn get(&self, family: AddressFamily, domain: &str) -> Option<CacheLookup>;

    /// Stores or overwrites the entry. `ttl_secs == PERMANENT` never expires.
    fn put(
        &self,
        family: AddressFamily,
        domain: &str,
        address: IpAddr,
        ttl_secs: u32,
    ) -> Result<(), DomainError>;

    /// Returns whether an entry was removed. Missing keys are not an error.
    fn delete(&self, family: AddressFamily, domain: &str) -> bool;

    fn flush(&self);

    /// Drops expired entries and returns how many were removed.
    fn purge_expired(&self) -> usize;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
