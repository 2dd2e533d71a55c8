use super::Repositories;
use anyhow::Context;
use sinkhole_application::ports::DnsCachePort;
use sinkhole_application::use_cases::{
    HandleDnsQueryUseCase, LoadDomainListsUseCase, PinDomainUseCase, SinkholeAddresses,
};
use sinkhole_domain::Config;
use sinkhole_infrastructure::dns::{DnsCache, DnsCacheConfig, DnsForwarder, DnsServerHandler};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

pub struct DnsServices {
    pub cache: Arc<DnsCache>,
    pub handler: Arc<DnsServerHandler>,
}

impl DnsServices {
    pub async fn new(config: &Config, repos: &Repositories) -> anyhow::Result<Self> {
        info!("Initializing DNS services");

        let cache = Arc::new(DnsCache::new(DnsCacheConfig {
            shard_amount: config.dns.cache_shard_amount,
            ..DnsCacheConfig::default()
        }));

        let upstream = config
            .dns
            .upstream_socket_addr()
            .context("upstream_server is not a valid address")?;
        let forwarder = Arc::new(DnsForwarder::udp(
            upstream,
            Duration::from_secs(config.dns.query_timeout),
        ));

        Self::preload_local_records(config, cache.clone());

        let addresses = SinkholeAddresses::new(config.sinkhole_ipv4(), config.sinkhole_ipv6());
        let loaded = LoadDomainListsUseCase::new(repos.domain_list.clone(), cache.clone(), addresses)
            .execute()
            .await?;
        info!(blocked_domains = loaded, "Blocklist loaded into cache");

        let use_case = Arc::new(HandleDnsQueryUseCase::new(
            cache.clone(),
            forwarder,
            repos.query_log.clone(),
            config.dns.cache_ttl,
        ));

        info!(upstream = %upstream, "DNS services initialized successfully");

        Ok(Self {
            cache,
            handler: Arc::new(DnsServerHandler::new(use_case)),
        })
    }

    fn preload_local_records(config: &Config, cache: Arc<dyn DnsCachePort>) {
        let records = config.pinned_records();
        if records.is_empty() {
            return;
        }

        let pin = PinDomainUseCase::new(cache);
        let mut pinned = 0usize;

        for record in &records {
            let fqdn = record.fqdn();
            let Some(address) = record.address() else {
                warn!(hostname = %fqdn, ip = %record.ip, "Skipping local record with invalid IP");
                continue;
            };
            match pin.execute(&fqdn, address) {
                Ok(()) => pinned += 1,
                Err(e) => warn!(hostname = %fqdn, error = %e, "Failed to pin local record"),
            }
        }

        info!(count = pinned, "Local DNS records pinned in cache");
    }
}
