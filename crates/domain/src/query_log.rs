use crate::dns_record::RecordType;
use chrono::{DateTime, Utc};
use std::net::IpAddr;
use std::sync::Arc;

/// Notification emitted once per answered question.
#[derive(Debug, Clone)]
pub struct QueryLog {
    pub domain: Arc<str>,
    pub record_type: RecordType,
    pub client_ip: IpAddr,
    pub cache_hit: bool,
    pub blocked: bool,
    pub timestamp: DateTime<Utc>,
}
