//! Sinkhole Domain Layer
pub mod config;
pub mod dns_record;
pub mod dns_request;
pub mod domain_list;
pub mod errors;
pub mod query_log;

pub use config::{CliOverrides, Config, ConfigError};
pub use dns_record::{AddressFamily, RecordType};
pub use dns_request::{normalize_domain, DnsRequest};
pub use domain_list::{parse_list_domain, ListEntry};
pub use errors::DomainError;
pub use query_log::QueryLog;
