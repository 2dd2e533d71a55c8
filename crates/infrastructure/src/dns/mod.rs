pub mod cache;
pub mod forwarding;
pub mod listener;
pub mod server;
pub mod transport;

pub use cache::{CacheKey, DnsCache, DnsCacheConfig};
pub use forwarding::DnsForwarder;
pub use listener::{DnsListener, Framing, MAX_DATAGRAM_SIZE};
pub use server::DnsServerHandler;
