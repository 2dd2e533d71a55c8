use crate::dns::forwarding::{serialize_message, RecordTypeMapper};
use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};
use sinkhole_application::use_cases::HandleDnsQueryUseCase;
use sinkhole_domain::DnsRequest;
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{debug, warn};

/// Turns one decoded client message into one reply, shared by both listeners.
pub struct DnsServerHandler {
    use_case: Arc<HandleDnsQueryUseCase>,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<HandleDnsQueryUseCase>) -> Self {
        Self { use_case }
    }

    /// Returns the serialized reply, or `None` when the datagram gets no answer
    /// (malformed, or a response rather than a query).
    pub async fn handle_message(&self, request_bytes: &[u8], client_ip: IpAddr) -> Option<Vec<u8>> {
        let request = match Message::from_vec(request_bytes) {
            Ok(message) => message,
            Err(e) => {
                debug!(client = %client_ip, error = %e, "Dropping malformed DNS message");
                return None;
            }
        };

        if request.message_type() != MessageType::Query {
            debug!(client = %client_ip, id = request.id(), "Dropping non-query message");
            return None;
        }

        let reply = self.build_reply(&request, client_ip).await;

        match serialize_message(&reply) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                warn!(client = %client_ip, error = %e, "Failed to encode reply");
                None
            }
        }
    }

    async fn build_reply(&self, request: &Message, client_ip: IpAddr) -> Message {
        let mut reply = Message::new(request.id(), MessageType::Response, request.op_code());
        reply.set_recursion_desired(request.recursion_desired());
        reply.set_recursion_available(true);

        if request.op_code() != OpCode::Query {
            debug!(op_code = ?request.op_code(), "Unsupported opcode");
            reply.set_response_code(ResponseCode::NotImp);
            return reply;
        }

        reply.add_queries(request.queries().iter().cloned());

        for query in request.queries() {
            // Keys stay in wire form; persisted lists only hold ASCII names.
            let dns_request = DnsRequest::new(
                query.name().to_ascii(),
                RecordTypeMapper::from_hickory(query.query_type()),
                client_ip,
            );

            match self.use_case.execute(&dns_request).await {
                Ok(outcome) => {
                    reply.add_answers(outcome.answers);
                }
                Err(e) => {
                    // The question is left unanswered; the rest of the message proceeds.
                    warn!(
                        domain = %dns_request.domain,
                        record_type = %dns_request.record_type,
                        error = %e,
                        "Question aborted"
                    );
                }
            }
        }

        reply
    }
}
