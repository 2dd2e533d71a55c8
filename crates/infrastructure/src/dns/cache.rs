pub mod key;
pub mod record;
pub mod storage;

pub use key::CacheKey;
pub use record::CachedAddress;
pub use storage::{DnsCache, DnsCacheConfig};
