use crate::crypto::PayloadCipher;
use crate::dns::server::DnsServerHandler;
use sinkhole_domain::DomainError;
use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Receive buffer size; longer datagrams are truncated by the kernel.
pub const MAX_DATAGRAM_SIZE: usize = 4096;

/// How datagrams are wrapped on the wire.
#[derive(Clone)]
pub enum Framing {
    Plain,
    Encrypted(Arc<PayloadCipher>),
}

impl Framing {
    fn name(&self) -> &'static str {
        match self {
            Framing::Plain => "plain",
            Framing::Encrypted(_) => "encrypted",
        }
    }

    fn open(&self, datagram: &[u8]) -> Result<Vec<u8>, DomainError> {
        match self {
            Framing::Plain => Ok(datagram.to_vec()),
            Framing::Encrypted(cipher) => cipher.decrypt(datagram),
        }
    }

    fn seal(&self, reply: Vec<u8>) -> Result<Vec<u8>, DomainError> {
        match self {
            Framing::Plain => Ok(reply),
            Framing::Encrypted(cipher) => cipher.encrypt(&reply),
        }
    }
}

/// UDP receive loop feeding the DNS handler.
pub struct DnsListener {
    socket: Arc<UdpSocket>,
    framing: Framing,
}

impl DnsListener {
    pub fn bind(addr: SocketAddr, framing: Framing) -> Result<Self, DomainError> {
        let socket = create_udp_socket(addr).map_err(|e| DomainError::TransportError {
            server: addr.to_string(),
            reason: format!("bind failed: {}", e),
        })?;

        info!(bind_address = %addr, framing = framing.name(), "DNS listener bound");

        Ok(Self {
            socket: Arc::new(socket),
            framing,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, DomainError> {
        self.socket
            .local_addr()
            .map_err(|e| DomainError::IoError(e.to_string()))
    }

    /// Runs until `shutdown` is cancelled. Each datagram is handled on its own task.
    pub async fn serve(self, handler: Arc<DnsServerHandler>, shutdown: CancellationToken) {
        let framing = self.framing.name();
        let mut recv_buf = [0u8; MAX_DATAGRAM_SIZE];

        loop {
            let (len, from) = tokio::select! {
                _ = shutdown.cancelled() => break,
                received = self.socket.recv_from(&mut recv_buf) => match received {
                    Ok(received) => received,
                    Err(e) => {
                        warn!(framing, error = %e, "UDP recv error");
                        continue;
                    }
                },
            };

            let datagram: Arc<[u8]> = Arc::from(&recv_buf[..len]);
            let socket = self.socket.clone();
            let handler = handler.clone();
            let wire = self.framing.clone();

            tokio::spawn(async move {
                respond(&socket, &handler, &wire, &datagram, from).await;
            });
        }

        info!(framing, "DNS listener stopped");
    }
}

async fn respond(
    socket: &UdpSocket,
    handler: &DnsServerHandler,
    framing: &Framing,
    datagram: &[u8],
    from: SocketAddr,
) {
    let request = match framing.open(datagram) {
        Ok(request) => request,
        Err(e) => {
            debug!(client = %from, error = %e, "Dropping undecryptable datagram");
            return;
        }
    };

    let Some(reply) = handler.handle_message(&request, from.ip()).await else {
        return;
    };

    let reply = match framing.seal(reply) {
        Ok(reply) => reply,
        Err(e) => {
            warn!(client = %from, error = %e, "Failed to encrypt reply");
            return;
        }
    };

    if let Err(e) = socket.send_to(&reply, from).await {
        warn!(client = %from, error = %e, "Failed to send reply");
    }
}

fn create_udp_socket(addr: SocketAddr) -> std::io::Result<UdpSocket> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.bind(&addr.into())?;
    socket.set_nonblocking(true)?;

    UdpSocket::from_std(socket.into())
}
