use crate::{bootstrap, di, server};
use sinkhole_application::ports::DnsCachePort;
use sinkhole_application::use_cases::{
    AllowDomainUseCase, BlockDomainUseCase, ImportBlocklistUseCase, RemoveDomainUseCase,
    SinkholeAddresses,
};
use sinkhole_domain::Config;
use sinkhole_infrastructure::crypto::EncryptionKey;
use sinkhole_infrastructure::dns::DnsCache;
use sinkhole_jobs::{join_jobs, CachePurgeJob, JobRunner};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

pub async fn serve(config: &Config) -> anyhow::Result<()> {
    info!("Starting Sinkhole v{}", env!("CARGO_PKG_VERSION"));

    let pool = bootstrap::init_database(&config.database).await?;
    let repos = di::Repositories::new(pool, &config.database);
    let dns = di::DnsServices::new(config, &repos).await?;

    let shutdown = CancellationToken::new();
    let mut listeners = server::start_dns_listeners(config, dns.handler.clone(), &shutdown)?;

    let purge = CachePurgeJob::new(dns.cache.clone())
        .with_interval(Duration::from_secs(config.dns.purge_interval));
    let jobs = JobRunner::new()
        .with_cache_purge(purge)
        .with_shutdown_token(shutdown.clone())
        .start();

    tokio::select! {
        signal = tokio::signal::ctrl_c() => {
            if let Err(e) = signal {
                error!(error = %e, "Failed to listen for shutdown signal");
            }
            info!("Shutdown signal received");
        }
        _ = listeners.join_next() => {
            warn!("DNS listener exited unexpectedly");
        }
    }

    shutdown.cancel();
    while listeners.join_next().await.is_some() {}
    join_jobs(jobs).await;

    info!("Server shutdown complete");
    Ok(())
}

pub fn generate_key(config: &Config, output: Option<PathBuf>) -> anyhow::Result<()> {
    let path = output.unwrap_or_else(|| PathBuf::from(&config.encryption.key_file));
    EncryptionKey::generate()?.export(&path)?;
    println!("Encryption key written to {}", path.display());
    Ok(())
}

/// List edits run against the database only; a running server picks them up
/// on its next start. The scratch cache satisfies the use cases' eviction step.
fn scratch_cache() -> Arc<dyn DnsCachePort> {
    Arc::new(DnsCache::default())
}

fn sinkhole_addresses(config: &Config) -> SinkholeAddresses {
    SinkholeAddresses::new(config.sinkhole_ipv4(), config.sinkhole_ipv6())
}

pub async fn block(config: &Config, domain: &str) -> anyhow::Result<()> {
    let repos = open_repositories(config).await?;
    let domain = BlockDomainUseCase::new(repos.domain_list, scratch_cache(), sinkhole_addresses(config))
        .execute(domain)
        .await?;
    println!("Blocked {}", domain);
    Ok(())
}

pub async fn allow(config: &Config, domain: &str) -> anyhow::Result<()> {
    let repos = open_repositories(config).await?;
    let domain = AllowDomainUseCase::new(repos.domain_list, scratch_cache())
        .execute(domain)
        .await?;
    println!("Allowed {}", domain);
    Ok(())
}

pub async fn remove(config: &Config, domain: &str) -> anyhow::Result<()> {
    let repos = open_repositories(config).await?;
    let removed = RemoveDomainUseCase::new(repos.domain_list, scratch_cache())
        .execute(domain)
        .await?;
    if removed {
        println!("Removed {}", domain);
    } else {
        println!("{} was not listed", domain);
    }
    Ok(())
}

pub async fn import(config: &Config, file: &Path) -> anyhow::Result<()> {
    let repos = open_repositories(config).await?;
    let summary = ImportBlocklistUseCase::new(repos.domain_list)
        .execute(file)
        .await?;
    println!(
        "Imported {} domains from {} ({} lines skipped)",
        summary.imported,
        file.display(),
        summary.skipped
    );
    Ok(())
}

async fn open_repositories(config: &Config) -> anyhow::Result<di::Repositories> {
    let pool = bootstrap::init_database(&config.database).await?;
    let mut db_config = config.database.clone();
    // No queries are answered, so no flush task is needed
    db_config.query_log_enabled = false;
    Ok(di::Repositories::new(pool, &db_config))
}
