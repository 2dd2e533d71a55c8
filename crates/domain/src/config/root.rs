use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::path::Path;

use super::blocking::BlockingConfig;
use super::database::DatabaseConfig;
use super::dns::DnsConfig;
use super::encryption::EncryptionConfig;
use super::errors::ConfigError;
use super::local_records::LocalDnsRecord;
use super::logging::LoggingConfig;
use super::server::ServerConfig;

const LOCAL_CONFIG_PATH: &str = "sinkhole.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/sinkhole/config.toml";

/// Main configuration structure for Sinkhole
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listen address and ports
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream and cache behaviour
    #[serde(default)]
    pub dns: DnsConfig,

    /// Sinkhole addresses
    #[serde(default)]
    pub blocking: BlockingConfig,

    /// Encrypted listener key material
    #[serde(default)]
    pub encryption: EncryptionConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub database: DatabaseConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. sinkhole.toml in current directory
    /// 3. /etc/sinkhole/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path.or_else(|| Self::discover_path()) {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    /// First configuration file found in the default locations.
    pub fn discover_path() -> Option<&'static str> {
        [LOCAL_CONFIG_PATH, SYSTEM_CONFIG_PATH]
            .into_iter()
            .find(|candidate| Path::new(candidate).exists())
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(port) = overrides.secure_dns_port {
            self.server.secure_dns_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(upstream) = overrides.upstream_server {
            self.dns.upstream_server = upstream;
        }
        if let Some(db) = overrides.database_path {
            self.database.path = db;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(invalid("server.dns_port", "port cannot be 0"));
        }
        if self.encryption.enabled {
            if self.server.secure_dns_port == 0 {
                return Err(invalid("server.secure_dns_port", "port cannot be 0"));
            }
            if self.server.secure_dns_port == self.server.dns_port {
                return Err(invalid(
                    "server.secure_dns_port",
                    "must differ from server.dns_port",
                ));
            }
        }
        if self.server.bind_address.parse::<IpAddr>().is_err() {
            return Err(invalid(
                "server.bind_address",
                format!("'{}' is not an IP address", self.server.bind_address),
            ));
        }
        if self.dns.upstream_socket_addr().is_none() {
            return Err(invalid(
                "dns.upstream_server",
                format!("'{}' is not a socket address", self.dns.upstream_server),
            ));
        }
        if self.dns.query_timeout == 0 {
            return Err(invalid("dns.query_timeout", "must be greater than 0"));
        }
        if self.dns.cache_ttl == 0 {
            return Err(invalid("dns.cache_ttl", "must be greater than 0"));
        }
        if self.dns.purge_interval == 0 {
            return Err(invalid("dns.purge_interval", "must be greater than 0"));
        }
        let shards = self.dns.cache_shard_amount;
        if shards < 2 || !shards.is_power_of_two() {
            return Err(invalid(
                "dns.cache_shard_amount",
                format!("{} is not a power of two greater than 1", shards),
            ));
        }
        if self.blocking.sinkhole_ipv4.parse::<Ipv4Addr>().is_err() {
            return Err(invalid("blocking.sinkhole_ipv4", "not an IPv4 address"));
        }
        if self.blocking.sinkhole_ipv6.parse::<Ipv6Addr>().is_err() {
            return Err(invalid("blocking.sinkhole_ipv6", "not an IPv6 address"));
        }
        for record in &self.dns.local_records {
            let family = record.family().ok_or_else(|| {
                invalid(
                    "dns.local_records",
                    format!("{}: record_type must be A or AAAA", record.fqdn()),
                )
            })?;
            match record.address() {
                Some(ip) if family.matches(&ip) => {}
                _ => {
                    return Err(invalid(
                        "dns.local_records",
                        format!("{}: '{}' is not a {} address", record.fqdn(), record.ip, family),
                    ))
                }
            }
        }
        Ok(())
    }

    /// Records pinned at startup: the server self-record first, then the
    /// configured local records, which override it on a shared name.
    pub fn pinned_records(&self) -> Vec<LocalDnsRecord> {
        let hostname = self.blocking.server_hostname.trim();
        let server_record = (!hostname.is_empty()).then(|| LocalDnsRecord {
            hostname: hostname.to_string(),
            domain: None,
            ip: self.sinkhole_ipv4().to_string(),
            record_type: "A".to_string(),
        });

        server_record
            .into_iter()
            .chain(self.dns.local_records.iter().cloned())
            .collect()
    }

    pub fn sinkhole_ipv4(&self) -> Ipv4Addr {
        self.blocking
            .sinkhole_ipv4
            .parse()
            .unwrap_or(Ipv4Addr::UNSPECIFIED)
    }

    pub fn sinkhole_ipv6(&self) -> Ipv6Addr {
        self.blocking
            .sinkhole_ipv6
            .parse()
            .unwrap_or(Ipv6Addr::UNSPECIFIED)
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Validation {
        field,
        reason: reason.into(),
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub secure_dns_port: Option<u16>,
    pub bind_address: Option<String>,
    pub upstream_server: Option<String>,
    pub database_path: Option<String>,
    pub log_level: Option<String>,
}
