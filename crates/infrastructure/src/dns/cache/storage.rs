use super::key::CacheKey;
use super::record::CachedAddress;
use dashmap::DashMap;
use rustc_hash::FxBuildHasher;
use sinkhole_application::ports::{CacheLookup, DnsCachePort, PERMANENT};
use sinkhole_domain::{AddressFamily, DomainError};
use std::net::IpAddr;
use std::time::Instant;
use tracing::{debug, info};

pub struct DnsCacheConfig {
    pub initial_capacity: usize,
    /// Rounded up to a power of two, minimum 2.
    pub shard_amount: usize,
}

impl Default for DnsCacheConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 4_096,
            shard_amount: 32,
        }
    }
}

/// Sharded in-memory address cache.
///
/// Every operation locks a single shard, so lookups for unrelated domains
/// never wait on each other or on the expiry sweep.
pub struct DnsCache {
    entries: DashMap<CacheKey, CachedAddress, FxBuildHasher>,
}

impl DnsCache {
    pub fn new(config: DnsCacheConfig) -> Self {
        let shard_amount = config.shard_amount.max(2).next_power_of_two();

        info!(
            initial_capacity = config.initial_capacity,
            shard_amount, "Initializing DNS cache"
        );

        Self {
            entries: DashMap::with_capacity_and_hasher_and_shard_amount(
                config.initial_capacity,
                FxBuildHasher,
                shard_amount,
            ),
        }
    }

    /// Lookup evaluated at `now`.
    pub fn get_at(&self, family: AddressFamily, domain: &str, now: Instant) -> Option<CacheLookup> {
        let key = CacheKey::new(family, domain);

        // Copy out so the shard read lock is released before any removal.
        let cached = *self.entries.get(&key)?.value();

        if !cached.is_expired_at(now) {
            return Some(CacheLookup {
                address: cached.address,
                permanent: cached.is_permanent(),
                remaining_ttl: cached.remaining_ttl_at(now),
            });
        }

        // Re-checked under the write lock: a concurrent put may have refreshed it.
        self.entries
            .remove_if(&key, |_, cached| cached.is_expired_at(now));
        debug!(domain = %domain, family = %family, "Lazily expired cache entry");
        None
    }

    /// Insert with `now` as the insertion instant.
    pub fn put_at(
        &self,
        family: AddressFamily,
        domain: &str,
        address: IpAddr,
        ttl_secs: u32,
        now: Instant,
    ) -> Result<(), DomainError> {
        if !family.matches(&address) {
            return Err(DomainError::InvalidIpAddress(format!(
                "{} is not an {} address",
                address, family
            )));
        }

        let cached = if ttl_secs == PERMANENT {
            CachedAddress::permanent(address)
        } else {
            CachedAddress::learned(address, ttl_secs, now)
        };

        self.entries.insert(CacheKey::new(family, domain), cached);

        debug!(
            domain = %domain,
            family = %family,
            address = %address,
            ttl = ttl_secs,
            "Inserted record into cache"
        );
        Ok(())
    }

    /// Sweep evaluated at `now`.
    pub fn purge_expired_at(&self, now: Instant) -> usize {
        let mut removed = 0;
        self.entries.retain(|_, cached| {
            let keep = !cached.is_expired_at(now);
            if !keep {
                removed += 1;
            }
            keep
        });
        removed
    }
}

impl Default for DnsCache {
    fn default() -> Self {
        Self::new(DnsCacheConfig::default())
    }
}

impl DnsCachePort for DnsCache {
    fn get(&self, family: AddressFamily, domain: &str) -> Option<CacheLookup> {
        self.get_at(family, domain, Instant::now())
    }

    fn put(
        &self,
        family: AddressFamily,
        domain: &str,
        address: IpAddr,
        ttl_secs: u32,
    ) -> Result<(), DomainError> {
        self.put_at(family, domain, address, ttl_secs, Instant::now())
    }

    fn delete(&self, family: AddressFamily, domain: &str) -> bool {
        self.entries.remove(&CacheKey::new(family, domain)).is_some()
    }

    fn flush(&self) {
        let dropped = self.entries.len();
        self.entries.clear();
        info!(dropped, "Cache flushed");
    }

    fn purge_expired(&self) -> usize {
        self.purge_expired_at(Instant::now())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
