use super::message_builder::MessageBuilder;
use super::response_parser::ResponseParser;
use crate::dns::transport::{DnsTransport, UdpTransport};
use async_trait::async_trait;
use sinkhole_application::ports::{UpstreamAnswer, UpstreamResolver};
use sinkhole_domain::{DomainError, RecordType};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Stub forwarder to a single upstream resolver.
pub struct DnsForwarder {
    transport: Arc<dyn DnsTransport>,
    timeout: Duration,
}

impl DnsForwarder {
    pub fn new(transport: Arc<dyn DnsTransport>, timeout: Duration) -> Self {
        Self { transport, timeout }
    }

    pub fn udp(server: SocketAddr, timeout: Duration) -> Self {
        Self::new(Arc::new(UdpTransport::new(server)), timeout)
    }
}

#[async_trait]
impl UpstreamResolver for DnsForwarder {
    async fn resolve(
        &self,
        domain: &str,
        record_type: RecordType,
    ) -> Result<UpstreamAnswer, DomainError> {
        let (id, request_bytes) = MessageBuilder::build_query(domain, record_type)?;

        let reply = self.transport.send(&request_bytes, self.timeout).await?;
        let response = ResponseParser::parse(&reply.bytes)?;

        if response.id != id {
            return Err(DomainError::InvalidDnsResponse(format!(
                "Response ID {} does not match query ID {}",
                response.id, id
            )));
        }

        if !response.is_success() {
            return Err(DomainError::UpstreamRcode {
                rcode: response.rcode.to_string(),
            });
        }

        debug!(
            server = %self.transport.server(),
            protocol = reply.protocol_used,
            domain = %domain,
            record_type = %record_type,
            answers = response.answers.len(),
            truncated = response.truncated,
            "Upstream query completed"
        );

        Ok(UpstreamAnswer {
            answers: response.answers,
        })
    }
}
