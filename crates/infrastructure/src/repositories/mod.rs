pub mod domain_list_repository;
pub mod query_log_repository;

pub use domain_list_repository::SqliteDomainListRepository;
pub use query_log_repository::{DiscardQueryLogRepository, SqliteQueryLogRepository};
