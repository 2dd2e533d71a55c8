use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BlockingConfig {
    /// Address handed out for blocked `A` queries.
    #[serde(default = "default_sinkhole_ipv4")]
    pub sinkhole_ipv4: String,

    /// Address handed out for blocked `AAAA` queries.
    #[serde(default = "default_sinkhole_ipv6")]
    pub sinkhole_ipv6: String,

    /// Name pinned to `sinkhole_ipv4` so clients can reach this host.
    /// An empty string disables the record.
    #[serde(default = "default_server_hostname")]
    pub server_hostname: String,
}

impl Default for BlockingConfig {
    fn default() -> Self {
        Self {
            sinkhole_ipv4: default_sinkhole_ipv4(),
            sinkhole_ipv6: default_sinkhole_ipv6(),
            server_hostname: default_server_hostname(),
        }
    }
}

fn default_sinkhole_ipv4() -> String {
    "0.0.0.0".to_string()
}

fn default_sinkhole_ipv6() -> String {
    "::".to_string()
}

fn default_server_hostname() -> String {
    "go.hole".to_string()
}
