mod helpers;

use helpers::{MockDnsCache, MockDomainListRepository};
use sinkhole_application::ports::{DnsCachePort, DomainListRepository, PERMANENT};
use sinkhole_application::use_cases::{
    AllowDomainUseCase, BlockDomainUseCase, ImportBlocklistUseCase, LoadDomainListsUseCase,
    PinDomainUseCase, RemoveDomainUseCase, SinkholeAddresses,
};
use sinkhole_domain::{AddressFamily, DomainError, ListEntry};
use std::io::Write;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::Arc;

fn sinkhole() -> SinkholeAddresses {
    SinkholeAddresses::new(Ipv4Addr::UNSPECIFIED, Ipv6Addr::UNSPECIFIED)
}

fn assert_sinkholed(cache: &MockDnsCache, domain: &str) {
    assert_eq!(
        cache.entry(AddressFamily::V4, domain),
        Some((IpAddr::V4(Ipv4Addr::UNSPECIFIED), PERMANENT))
    );
    assert_eq!(
        cache.entry(AddressFamily::V6, domain),
        Some((IpAddr::V6(Ipv6Addr::UNSPECIFIED), PERMANENT))
    );
}

// ── block ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_block_persists_and_sinkholes_both_families() {
    let repo = Arc::new(MockDomainListRepository::new());
    let cache = Arc::new(MockDnsCache::new());
    let use_case = BlockDomainUseCase::new(repo.clone(), cache.clone(), sinkhole());

    let domain = use_case.execute("Ads.Example.com.").await.unwrap();

    assert_eq!(domain, "ads.example.com");
    assert_eq!(
        repo.find_domain("ads.example.com").await.unwrap(),
        Some(ListEntry::blocked("ads.example.com"))
    );
    assert_sinkholed(&cache, "ads.example.com");
}

#[tokio::test]
async fn test_block_overwrites_learned_entry() {
    let repo = Arc::new(MockDomainListRepository::new());
    let cache = Arc::new(MockDnsCache::new());
    cache
        .put(
            AddressFamily::V4,
            "tracker.example.com",
            IpAddr::V4(Ipv4Addr::new(1, 2, 3, 4)),
            1800,
        )
        .unwrap();
    let use_case = BlockDomainUseCase::new(repo, cache.clone(), sinkhole());

    use_case.execute("tracker.example.com").await.unwrap();

    assert_sinkholed(&cache, "tracker.example.com");
}

#[tokio::test]
async fn test_block_rejects_invalid_domain() {
    let repo = Arc::new(MockDomainListRepository::new());
    let cache = Arc::new(MockDnsCache::new());
    let use_case = BlockDomainUseCase::new(repo, cache.clone(), sinkhole());

    let result = use_case.execute("not a domain").await;

    assert!(matches!(result, Err(DomainError::InvalidDomainName(_))));
    assert!(cache.is_empty());
}

// ── allow / remove ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_allow_evicts_cached_block() {
    let repo = Arc::new(MockDomainListRepository::with_entries(&["ads.example.com"], &[]));
    let cache = Arc::new(MockDnsCache::new());
    BlockDomainUseCase::new(repo.clone(), cache.clone(), sinkhole())
        .execute("ads.example.com")
        .await
        .unwrap();

    AllowDomainUseCase::new(repo.clone(), cache.clone())
        .execute("ads.example.com")
        .await
        .unwrap();

    assert!(cache.is_empty());
    assert_eq!(
        repo.find_domain("ads.example.com").await.unwrap(),
        Some(ListEntry::allowed("ads.example.com"))
    );
}

#[tokio::test]
async fn test_remove_reports_whether_listed() {
    let repo = Arc::new(MockDomainListRepository::with_entries(&["ads.example.com"], &[]));
    let cache = Arc::new(MockDnsCache::new());
    let use_case = RemoveDomainUseCase::new(repo.clone(), cache);

    assert!(use_case.execute("ads.example.com").await.unwrap());
    assert!(!use_case.execute("ads.example.com").await.unwrap());
    assert!(repo.find_domain("ads.example.com").await.unwrap().is_none());
}

// ── pin ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_pin_stores_permanent_entry_in_address_family() {
    let cache = Arc::new(MockDnsCache::new());
    let use_case = PinDomainUseCase::new(cache.clone());

    use_case
        .execute("go.hole.", IpAddr::V4(Ipv4Addr::new(192, 168, 1, 2)))
        .unwrap();
    use_case
        .execute("go.hole", "fd00::2".parse().unwrap())
        .unwrap();

    assert_eq!(
        cache.entry(AddressFamily::V4, "go.hole"),
        Some((IpAddr::V4(Ipv4Addr::new(192, 168, 1, 2)), PERMANENT))
    );
    assert!(cache.entry(AddressFamily::V6, "go.hole").is_some());
}

// ── load at startup ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_load_sinkholes_blocked_and_skips_allowed() {
    let repo = Arc::new(MockDomainListRepository::with_entries(
        &["ads.example.com", "tracker.example.net"],
        &["cdn.example.org"],
    ));
    let cache = Arc::new(MockDnsCache::new());
    let use_case = LoadDomainListsUseCase::new(repo, cache.clone(), sinkhole());

    let loaded = use_case.execute().await.unwrap();

    assert_eq!(loaded, 2);
    assert_sinkholed(&cache, "ads.example.com");
    assert_sinkholed(&cache, "tracker.example.net");
    assert!(cache.entry(AddressFamily::V4, "cdn.example.org").is_none());
}

// ── import ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_import_blocks_file_entries_except_allowed() {
    let repo = Arc::new(MockDomainListRepository::with_entries(&[], &["keep.example.com"]));
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "# hosts style").unwrap();
    writeln!(file, "0.0.0.0 ads.example.com").unwrap();
    writeln!(file, "0.0.0.0 keep.example.com").unwrap();
    writeln!(file, "tracker.example.net").unwrap();
    writeln!(file, "bad..entry").unwrap();

    let summary = ImportBlocklistUseCase::new(repo.clone())
        .execute(file.path())
        .await
        .unwrap();

    assert_eq!(summary.imported, 2);
    assert_eq!(summary.skipped, 2);
    assert_eq!(
        repo.blocked_domains().await.unwrap(),
        vec!["ads.example.com".to_string(), "tracker.example.net".to_string()]
    );
    assert_eq!(
        repo.find_domain("keep.example.com").await.unwrap(),
        Some(ListEntry::allowed("keep.example.com"))
    );
}

#[tokio::test]
async fn test_import_missing_file_is_io_error() {
    let repo = Arc::new(MockDomainListRepository::new());
    let result = ImportBlocklistUseCase::new(repo)
        .execute(std::path::Path::new("/nonexistent/blocklist.txt"))
        .await;

    assert!(matches!(result, Err(DomainError::IoError(_))));
}
