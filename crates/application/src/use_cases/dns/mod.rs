pub mod handle_dns_query;

pub use handle_dns_query::{HandleDnsQueryUseCase, QueryOutcome, PERMANENT_ANSWER_TTL};
