use sinkhole_domain::{parse_list_domain, DomainError};
use std::collections::HashSet;
use std::net::IpAddr;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use crate::ports::DomainListRepository;

/// Host names that appear in stock hosts files and must never be blocked.
const RESERVED_HOSTS: &[&str] = &[
    "localhost",
    "localhost.localdomain",
    "local",
    "broadcasthost",
    "ip6-localhost",
    "ip6-loopback",
    "ip6-localnet",
    "ip6-mcastprefix",
    "ip6-allnodes",
    "ip6-allrouters",
    "ip6-allhosts",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: u64,
    pub skipped: usize,
}

/// Extracts domains from a blocklist in either hosts format
/// (`0.0.0.0 ads.example.com`) or one domain per line.
///
/// Returns the unique domains in file order and the number of lines that
/// could not be used.
pub fn parse_blocklist(contents: &str) -> (Vec<String>, usize) {
    let mut seen = HashSet::new();
    let mut domains = Vec::new();
    let mut skipped = 0;

    for (index, raw) in contents.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        let mut fields = line.split_whitespace();
        let first = fields.next().unwrap_or("");
        let candidates: Vec<&str> = if first.parse::<IpAddr>().is_ok() {
            fields.collect()
        } else {
            std::iter::once(first).chain(fields).collect()
        };

        if candidates.is_empty() {
            skipped += 1;
            continue;
        }

        for candidate in candidates {
            match parse_list_domain(candidate) {
                Ok(domain) if RESERVED_HOSTS.contains(&domain.as_str()) => {}
                Ok(domain) => {
                    if seen.insert(domain.clone()) {
                        domains.push(domain);
                    }
                }
                Err(e) => {
                    debug!(line = index + 1, error = %e, "Skipping blocklist entry");
                    skipped += 1;
                }
            }
        }
    }

    (domains, skipped)
}

pub struct ImportBlocklistUseCase {
    repo: Arc<dyn DomainListRepository>,
}

impl ImportBlocklistUseCase {
    pub fn new(repo: Arc<dyn DomainListRepository>) -> Self {
        Self { repo }
    }

    /// Reads a blocklist file and persists every domain as blocked. Domains
    /// already allow-listed are left alone.
    pub async fn execute(&self, path: &Path) -> Result<ImportSummary, DomainError> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| DomainError::IoError(format!("{}: {}", path.display(), e)))?;

        let (domains, mut skipped) = parse_blocklist(&contents);

        let allowed: HashSet<String> = self.repo.allowed_domains().await?.into_iter().collect();
        let before = domains.len();
        let domains: Vec<String> = domains
            .into_iter()
            .filter(|d| !allowed.contains(d))
            .collect();
        skipped += before - domains.len();

        let imported = self.repo.block_many(&domains).await?;

        info!(
            path = %path.display(),
            imported,
            skipped,
            "Blocklist imported"
        );
        Ok(ImportSummary { imported, skipped })
    }
}
