#![allow(dead_code)]

use async_trait::async_trait;
use hickory_proto::rr::Record;
use sinkhole_application::ports::{
    CacheLookup, DnsCachePort, DomainListRepository, QueryLogRepository, UpstreamAnswer,
    UpstreamResolver, PERMANENT,
};
use sinkhole_domain::{AddressFamily, DomainError, ListEntry, QueryLog, RecordType};
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

// ── cache ──────────────────────────────────────────────────────────────────

/// HashMap-backed cache. Learned entries never expire here; the stored TTL is
/// reported back as the remaining TTL.
#[derive(Default)]
pub struct MockDnsCache {
    entries: Mutex<HashMap<(AddressFamily, String), (IpAddr, u32)>>,
    fail_puts: AtomicBool,
    get_calls: AtomicUsize,
}

impl MockDnsCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_puts(&self, fail: bool) {
        self.fail_puts.store(fail, Ordering::SeqCst);
    }

    pub fn entry(&self, family: AddressFamily, domain: &str) -> Option<(IpAddr, u32)> {
        self.entries
            .lock()
            .unwrap()
            .get(&(family, domain.to_string()))
            .copied()
    }

    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }
}

impl DnsCachePort for MockDnsCache {
    fn get(&self, family: AddressFamily, domain: &str) -> Option<CacheLookup> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.entry(family, domain).map(|(address, ttl)| CacheLookup {
            address,
            permanent: ttl == PERMANENT,
            remaining_ttl: (ttl != PERMANENT).then_some(ttl),
        })
    }

    fn put(
        &self,
        family: AddressFamily,
        domain: &str,
        address: IpAddr,
        ttl_secs: u32,
    ) -> Result<(), DomainError> {
        if self.fail_puts.load(Ordering::SeqCst) {
            return Err(DomainError::IoError("mock cache rejects writes".to_string()));
        }
        if !family.matches(&address) {
            return Err(DomainError::InvalidIpAddress(address.to_string()));
        }
        self.entries
            .lock()
            .unwrap()
            .insert((family, domain.to_string()), (address, ttl_secs));
        Ok(())
    }

    fn delete(&self, family: AddressFamily, domain: &str) -> bool {
        self.entries
            .lock()
            .unwrap()
            .remove(&(family, domain.to_string()))
            .is_some()
    }

    fn flush(&self) {
        self.entries.lock().unwrap().clear();
    }

    fn purge_expired(&self) -> usize {
        0
    }

    fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

// ── upstream ───────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockUpstreamResolver {
    responses: Mutex<HashMap<String, Vec<Record>>>,
    errors: Mutex<HashMap<String, DomainError>>,
    calls: Mutex<Vec<(String, RecordType)>>,
}

impl MockUpstreamResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_response(&self, domain: &str, answers: Vec<Record>) {
        self.responses
            .lock()
            .unwrap()
            .insert(domain.to_string(), answers);
    }

    pub fn set_error(&self, domain: &str, error: DomainError) {
        self.errors.lock().unwrap().insert(domain.to_string(), error);
    }

    pub fn calls(&self) -> Vec<(String, RecordType)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl UpstreamResolver for MockUpstreamResolver {
    async fn resolve(
        &self,
        domain: &str,
        record_type: RecordType,
    ) -> Result<UpstreamAnswer, DomainError> {
        self.calls
            .lock()
            .unwrap()
            .push((domain.to_string(), record_type));

        if let Some(err) = self.errors.lock().unwrap().get(domain).cloned() {
            return Err(err);
        }

        self.responses
            .lock()
            .unwrap()
            .get(domain)
            .cloned()
            .map(|answers| UpstreamAnswer { answers })
            .ok_or(DomainError::QueryTimeout)
    }
}

// ── query log ──────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockQueryLogRepository {
    sync_logs: Mutex<Vec<QueryLog>>,
    fail: AtomicBool,
}

impl MockQueryLogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let repo = Self::default();
        repo.fail.store(true, Ordering::SeqCst);
        repo
    }

    pub fn get_sync_logs(&self) -> Vec<QueryLog> {
        self.sync_logs.lock().unwrap().clone()
    }
}

#[async_trait]
impl QueryLogRepository for MockQueryLogRepository {
    async fn log_query(&self, query: &QueryLog) -> Result<(), DomainError> {
        self.log_query_sync(query)
    }

    fn log_query_sync(&self, query: &QueryLog) -> Result<(), DomainError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::DatabaseError("mock log failure".to_string()));
        }
        self.sync_logs.lock().unwrap().push(query.clone());
        Ok(())
    }
}

// ── domain lists ───────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockDomainListRepository {
    entries: Mutex<HashMap<String, bool>>,
}

impl MockDomainListRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(blocked: &[&str], allowed: &[&str]) -> Self {
        let repo = Self::default();
        {
            let mut entries = repo.entries.lock().unwrap();
            for domain in blocked {
                entries.insert(domain.to_string(), false);
            }
            for domain in allowed {
                entries.insert(domain.to_string(), true);
            }
        }
        repo
    }

    fn listed(&self, allow: bool) -> Vec<String> {
        let mut domains: Vec<String> = self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, a)| **a == allow)
            .map(|(d, _)| d.clone())
            .collect();
        domains.sort();
        domains
    }
}

#[async_trait]
impl DomainListRepository for MockDomainListRepository {
    async fn block_domain(&self, domain: &str) -> Result<(), DomainError> {
        self.entries.lock().unwrap().insert(domain.to_string(), false);
        Ok(())
    }

    async fn block_many(&self, domains: &[String]) -> Result<u64, DomainError> {
        let mut entries = self.entries.lock().unwrap();
        for domain in domains {
            entries.insert(domain.clone(), false);
        }
        Ok(domains.len() as u64)
    }

    async fn allow_domain(&self, domain: &str) -> Result<(), DomainError> {
        self.entries.lock().unwrap().insert(domain.to_string(), true);
        Ok(())
    }

    async fn remove_domain(&self, domain: &str) -> Result<bool, DomainError> {
        Ok(self.entries.lock().unwrap().remove(domain).is_some())
    }

    async fn find_domain(&self, domain: &str) -> Result<Option<ListEntry>, DomainError> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .get(domain)
            .map(|allow| ListEntry {
                domain: domain.to_string(),
                allow: *allow,
            }))
    }

    async fn blocked_domains(&self) -> Result<Vec<String>, DomainError> {
        Ok(self.listed(false))
    }

    async fn allowed_domains(&self) -> Result<Vec<String>, DomainError> {
        Ok(self.listed(true))
    }
}
