use super::{AddressFamily, RecordType};
use chrono::{DateTime, Utc};
use std::net::IpAddr;
use std::sync::Arc;

/// Lower-cases a query name and strips the trailing root dot.
pub fn normalize_domain(name: &str) -> String {
    name.trim_end_matches('.').to_ascii_lowercase()
}

/// A single question received from a client.
#[derive(Debug, Clone)]
pub struct DnsRequest {
    /// The name exactly as it appeared in the question, used for synthesized answers.
    pub query_name: Arc<str>,
    pub domain: Arc<str>,
    pub record_type: RecordType,
    pub client_ip: IpAddr,
    pub received_at: DateTime<Utc>,
}

impl DnsRequest {
    pub fn new(query_name: impl Into<Arc<str>>, record_type: RecordType, client_ip: IpAddr) -> Self {
        let query_name = query_name.into();
        let domain: Arc<str> = normalize_domain(&query_name).into();
        Self {
            query_name,
            domain,
            record_type,
            client_ip,
            received_at: Utc::now(),
        }
    }

    pub fn family(&self) -> Option<AddressFamily> {
        AddressFamily::from_record_type(self.record_type)
    }
}
