pub mod blocking;
pub mod database;
pub mod dns;
pub mod encryption;
pub mod errors;
pub mod local_records;
pub mod logging;
pub mod root;
pub mod server;

pub use blocking::BlockingConfig;
pub use database::DatabaseConfig;
pub use dns::DnsConfig;
pub use encryption::EncryptionConfig;
pub use errors::ConfigError;
pub use local_records::LocalDnsRecord;
pub use logging::{LogFormat, LoggingConfig};
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
