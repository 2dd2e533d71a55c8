use sinkhole_domain::{CliOverrides, Config};
use tracing::info;

pub fn load_config(config_path: Option<&str>, cli_overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;
    config.validate()?;
    Ok(config)
}

/// Logged once the subscriber is installed, since loading happens before it.
pub fn log_config_summary(config_path: Option<&str>, config: &Config) {
    info!(
        config_file = config_path.or_else(|| Config::discover_path()).unwrap_or("default"),
        dns_port = config.server.dns_port,
        secure_dns_port = config.server.secure_dns_port,
        encryption = config.encryption.enabled,
        bind = %config.server.bind_address,
        upstream = %config.dns.upstream_server,
        "Configuration loaded"
    );
}
