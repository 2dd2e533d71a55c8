use serde::{Deserialize, Serialize};
use std::net::IpAddr;

use crate::dns_record::{AddressFamily, RecordType};

/// A name pinned to a fixed address, served as a permanent cache entry.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LocalDnsRecord {
    pub hostname: String,

    #[serde(default)]
    pub domain: Option<String>,

    pub ip: String,

    #[serde(default = "default_record_type")]
    pub record_type: String,
}

impl LocalDnsRecord {
    pub fn fqdn(&self) -> String {
        match self.domain {
            Some(ref domain) => format!("{}.{}", self.hostname, domain),
            None => self.hostname.clone(),
        }
    }

    pub fn family(&self) -> Option<AddressFamily> {
        self.record_type
            .parse::<RecordType>()
            .ok()
            .and_then(AddressFamily::from_record_type)
    }

    pub fn address(&self) -> Option<IpAddr> {
        self.ip.parse().ok()
    }
}

fn default_record_type() -> String {
    "A".to_string()
}
