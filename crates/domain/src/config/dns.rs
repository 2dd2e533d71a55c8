use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

use super::local_records::LocalDnsRecord;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DnsConfig {
    /// Upstream resolver, `host:port` or a bare IP (port 53 assumed).
    #[serde(default = "default_upstream_server")]
    pub upstream_server: String,

    /// Seconds to wait for an upstream reply.
    #[serde(default = "default_query_timeout")]
    pub query_timeout: u64,

    /// Lifetime in seconds of entries learned from upstream.
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl: u32,

    /// Seconds between expired-entry sweeps.
    #[serde(default = "default_purge_interval")]
    pub purge_interval: u64,

    #[serde(default = "default_cache_shard_amount")]
    pub cache_shard_amount: usize,

    #[serde(default)]
    pub local_records: Vec<LocalDnsRecord>,
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            upstream_server: default_upstream_server(),
            query_timeout: default_query_timeout(),
            cache_ttl: default_cache_ttl(),
            purge_interval: default_purge_interval(),
            cache_shard_amount: default_cache_shard_amount(),
            local_records: Vec::new(),
        }
    }
}

impl DnsConfig {
    /// Resolves `upstream_server` to a socket address, appending `:53` when
    /// no port is given.
    pub fn upstream_socket_addr(&self) -> Option<SocketAddr> {
        let raw = self.upstream_server.trim();
        if let Ok(addr) = raw.parse::<SocketAddr>() {
            return Some(addr);
        }
        let bare = raw.trim_start_matches('[').trim_end_matches(']');
        bare.parse::<std::net::IpAddr>()
            .ok()
            .map(|ip| SocketAddr::new(ip, 53))
    }
}

fn default_upstream_server() -> String {
    "8.8.8.8:53".to_string()
}

fn default_query_timeout() -> u64 {
    2
}

fn default_cache_ttl() -> u32 {
    1800
}

fn default_purge_interval() -> u64 {
    600
}

fn default_cache_shard_amount() -> usize {
    32
}
