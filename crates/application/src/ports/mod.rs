mod dns_cache_port;
mod domain_list_repository;
mod query_log_repository;
mod upstream_resolver;

pub use dns_cache_port::{CacheLookup, DnsCachePort, PERMANENT};
pub use domain_list_repository::DomainListRepository;
pub use query_log_repository::QueryLogRepository;
pub use upstream_resolver::{UpstreamAnswer, UpstreamResolver};
