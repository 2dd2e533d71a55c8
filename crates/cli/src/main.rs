use clap::{Parser, Subcommand};
use sinkhole_domain::CliOverrides;
use std::path::PathBuf;
use tracing::error;

mod bootstrap;
mod commands;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "sinkhole")]
#[command(version)]
#[command(about = "Sinkhole - caching DNS forwarder with ad-blocking and encrypted transport")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE", global = true)]
    config: Option<String>,

    /// Plaintext DNS port
    #[arg(short = 'd', long, global = true)]
    dns_port: Option<u16>,

    /// Encrypted DNS port
    #[arg(short = 's', long, global = true)]
    secure_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long, global = true)]
    bind: Option<String>,

    /// Upstream resolver (IP or IP:port)
    #[arg(short = 'u', long, global = true)]
    upstream: Option<String>,

    /// Database path
    #[arg(long, global = true)]
    database: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the DNS listeners (default)
    Serve,
    /// Generate a new encryption key and write it to disk
    GenerateKey {
        /// Key file to write; defaults to `encryption.key_file`
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Add a domain to the blocklist
    Block { domain: String },
    /// Add a domain to the allowlist
    Allow { domain: String },
    /// Remove a domain from both lists
    Remove { domain: String },
    /// Import a hosts-style or plain blocklist file
    Import { file: PathBuf },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_port: cli.dns_port,
        secure_dns_port: cli.secure_port,
        bind_address: cli.bind.clone(),
        upstream_server: cli.upstream.clone(),
        database_path: cli.database.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);
    bootstrap::config::log_config_summary(cli.config.as_deref(), &config);

    let result = match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => commands::serve(&config).await,
        Command::GenerateKey { output } => commands::generate_key(&config, output),
        Command::Block { domain } => commands::block(&config, &domain).await,
        Command::Allow { domain } => commands::allow(&config, &domain).await,
        Command::Remove { domain } => commands::remove(&config, &domain).await,
        Command::Import { file } => commands::import(&config, &file).await,
    };

    if let Err(e) = &result {
        error!(error = %e, "Command failed");
    }

    result
}
