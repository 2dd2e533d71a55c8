use sinkhole_domain::Config;
use sinkhole_infrastructure::crypto::{EncryptionKey, PayloadCipher};
use sinkhole_infrastructure::dns::{DnsListener, DnsServerHandler, Framing};
use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use std::sync::Arc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Binds the plaintext listener and, when enabled, the encrypted one.
///
/// Any bind failure or key import failure aborts startup before a listener
/// starts serving.
pub fn start_dns_listeners(
    config: &Config,
    handler: Arc<DnsServerHandler>,
    shutdown: &CancellationToken,
) -> anyhow::Result<JoinSet<()>> {
    let bind_ip: IpAddr = config.server.bind_address.parse()?;

    let mut listeners = vec![DnsListener::bind(
        SocketAddr::new(bind_ip, config.server.dns_port),
        Framing::Plain,
    )?];

    if config.encryption.enabled {
        let key = EncryptionKey::import(Path::new(&config.encryption.key_file))?;
        let cipher = Arc::new(PayloadCipher::new(&key)?);
        listeners.push(DnsListener::bind(
            SocketAddr::new(bind_ip, config.server.secure_dns_port),
            Framing::Encrypted(cipher),
        )?);
    } else {
        info!("Encryption disabled, secure listener not started");
    }

    let mut join_set = JoinSet::new();
    for listener in listeners {
        join_set.spawn(listener.serve(handler.clone(), shutdown.clone()));
    }

    info!(listeners = join_set.len(), "DNS server ready");
    Ok(join_set)
}
