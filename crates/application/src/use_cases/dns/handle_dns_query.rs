use crate::ports::{CacheLookup, DnsCachePort, QueryLogRepository, UpstreamResolver};
use hickory_proto::rr::rdata::{A, AAAA};
use hickory_proto::rr::{Name, RData, Record};
use sinkhole_domain::{AddressFamily, DnsRequest, DomainError, QueryLog};
use std::net::IpAddr;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// TTL advertised for answers built from permanent (blocked or pinned) entries.
pub const PERMANENT_ANSWER_TTL: u32 = 3600;

/// Result of resolving one question.
#[derive(Debug, Clone, Default)]
pub struct QueryOutcome {
    pub answers: Vec<Record>,
    pub cache_hit: bool,
    pub blocked: bool,
}

/// Cache-first resolution shared by every listener.
pub struct HandleDnsQueryUseCase {
    cache: Arc<dyn DnsCachePort>,
    upstream: Arc<dyn UpstreamResolver>,
    query_log: Arc<dyn QueryLogRepository>,
    cache_ttl: u32,
}

impl HandleDnsQueryUseCase {
    pub fn new(
        cache: Arc<dyn DnsCachePort>,
        upstream: Arc<dyn UpstreamResolver>,
        query_log: Arc<dyn QueryLogRepository>,
        cache_ttl: u32,
    ) -> Self {
        Self {
            cache,
            upstream,
            query_log,
            cache_ttl,
        }
    }

    /// Resolves one question.
    ///
    /// `A`/`AAAA` go through the cache; every other type is forwarded as-is.
    /// An upstream failure is returned as `Err` and nothing is logged or
    /// cached for the question.
    pub async fn execute(&self, request: &DnsRequest) -> Result<QueryOutcome, DomainError> {
        let outcome = match request.family() {
            Some(family) => self.resolve_address(request, family).await?,
            None => self.forward(request).await?,
        };

        info!(
            domain = %request.domain,
            record_type = %request.record_type,
            client = %request.client_ip,
            blocked = outcome.blocked,
            cached = outcome.cache_hit,
            "Query resolved"
        );
        self.record(request, &outcome);

        Ok(outcome)
    }

    async fn resolve_address(
        &self,
        request: &DnsRequest,
        family: AddressFamily,
    ) -> Result<QueryOutcome, DomainError> {
        if let Some(hit) = self.cache.get(family, &request.domain) {
            return Ok(QueryOutcome {
                answers: vec![synthesize_record(&request.query_name, hit)?],
                cache_hit: true,
                blocked: hit.permanent,
            });
        }

        let answer = self.forward(request).await?;

        for record in &answer.answers {
            let Some(address) = address_of(record, family) else {
                continue;
            };
            if let Err(e) = self
                .cache
                .put(family, &request.domain, address, self.cache_ttl)
            {
                warn!(error = %e, domain = %request.domain, "Failed to cache upstream answer");
            }
        }

        Ok(answer)
    }

    async fn forward(&self, request: &DnsRequest) -> Result<QueryOutcome, DomainError> {
        let answer = self
            .upstream
            .resolve(&request.domain, request.record_type)
            .await
            .map_err(|e| {
                warn!(
                    error = %e,
                    domain = %request.domain,
                    record_type = %request.record_type,
                    "Upstream resolution failed"
                );
                e
            })?;

        debug!(
            domain = %request.domain,
            answers = answer.answers.len(),
            "Upstream answered"
        );

        Ok(QueryOutcome {
            answers: answer.answers,
            cache_hit: false,
            blocked: false,
        })
    }

    fn record(&self, request: &DnsRequest, outcome: &QueryOutcome) {
        let entry = QueryLog {
            domain: Arc::clone(&request.domain),
            record_type: request.record_type,
            client_ip: request.client_ip,
            cache_hit: outcome.cache_hit,
            blocked: outcome.blocked,
            timestamp: request.received_at,
        };

        if let Err(e) = self.query_log.log_query_sync(&entry) {
            warn!(error = %e, domain = %entry.domain, "Failed to log query");
        }
    }
}

fn synthesize_record(query_name: &str, hit: CacheLookup) -> Result<Record, DomainError> {
    let name = Name::from_str(query_name)
        .map_err(|e| DomainError::InvalidDomainName(format!("{}: {}", query_name, e)))?;
    let ttl = hit.remaining_ttl.unwrap_or(PERMANENT_ANSWER_TTL);
    let rdata = match hit.address {
        IpAddr::V4(ipv4) => RData::A(A(ipv4)),
        IpAddr::V6(ipv6) => RData::AAAA(AAAA(ipv6)),
    };
    Ok(Record::from_rdata(name, ttl, rdata))
}

fn address_of(record: &Record, family: AddressFamily) -> Option<IpAddr> {
    match (record.data(), family) {
        (RData::A(a), AddressFamily::V4) => Some(IpAddr::V4(a.0)),
        (RData::AAAA(aaaa), AddressFamily::V6) => Some(IpAddr::V6(aaaa.0)),
        _ => None,
    }
}
