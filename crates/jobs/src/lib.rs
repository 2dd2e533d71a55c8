pub mod cache_purge;
pub mod runner;

pub use cache_purge::CachePurgeJob;
pub use runner::{join_jobs, JobRunner};
