use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: String,

    #[serde(default = "default_true")]
    pub query_log_enabled: bool,

    /// Entries buffered between the resolver and the log writer. When full,
    /// new entries are dropped.
    #[serde(default = "default_query_log_channel_capacity")]
    pub query_log_channel_capacity: usize,

    #[serde(default = "default_query_log_max_batch_size")]
    pub query_log_max_batch_size: usize,

    #[serde(default = "default_query_log_flush_interval_ms")]
    pub query_log_flush_interval_ms: u64,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_busy_timeout_secs")]
    pub busy_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            query_log_enabled: true,
            query_log_channel_capacity: default_query_log_channel_capacity(),
            query_log_max_batch_size: default_query_log_max_batch_size(),
            query_log_flush_interval_ms: default_query_log_flush_interval_ms(),
            max_connections: default_max_connections(),
            busy_timeout_secs: default_busy_timeout_secs(),
        }
    }
}

fn default_db_path() -> String {
    "./sinkhole.db".to_string()
}

fn default_true() -> bool {
    true
}

fn default_query_log_channel_capacity() -> usize {
    10_000
}

fn default_query_log_max_batch_size() -> usize {
    500
}

fn default_query_log_flush_interval_ms() -> u64 {
    200
}

fn default_max_connections() -> u32 {
    4
}

fn default_busy_timeout_secs() -> u64 {
    5
}
