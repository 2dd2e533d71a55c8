#![allow(dead_code)]
use sinkhole_application::ports::{CacheLookup, DnsCachePort};
use sinkhole_domain::{AddressFamily, DomainError};
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Cache that only counts purge sweeps; each sweep reports `expired_per_sweep`.
pub struct MockPurgeCache {
    purge_calls: AtomicUsize,
    expired_per_sweep: usize,
}

impl MockPurgeCache {
    pub fn new(expired_per_sweep: usize) -> Self {
        Self {
            purge_calls: AtomicUsize::new(0),
            expired_per_sweep,
        }
    }

    pub fn purge_calls(&self) -> usize {
        self.purge_calls.load(Ordering::SeqCst)
    }
}

impl DnsCachePort for MockPurgeCache {
    fn get(&self, _family: AddressFamily, _domain: &str) -> Option<CacheLookup> {
        None
    }

    fn put(
        &self,
        _family: AddressFamily,
        _domain: &str,
        _address: IpAddr,
        _ttl_secs: u32,
    ) -> Result<(), DomainError> {
        Ok(())
    }

    fn delete(&self, _family: AddressFamily, _domain: &str) -> bool {
        false
    }

    fn flush(&self) {}

    fn purge_expired(&self) -> usize {
        self.purge_calls.fetch_add(1, Ordering::SeqCst);
        self.expired_per_sweep
    }

    fn len(&self) -> usize {
        0
    }
}
