#![allow(dead_code)]
use hickory_proto::op::{Message, MessageType, ResponseCode};
use hickory_proto::rr::rdata::{A, AAAA};
use hickory_proto::rr::{RData, Record, RecordType};
use hickory_proto::serialize::binary::BinEncodable;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

/// What the mock upstream does with each query.
#[derive(Debug, Clone, Copy)]
pub enum MockBehavior {
    /// Answers A with `ipv4` and AAAA with `ipv6`, TTL 60.
    Answer { ipv4: Ipv4Addr, ipv6: Ipv6Addr },
    Rcode(ResponseCode),
    /// Answers with a message ID one higher than the query's.
    WrongId,
    Silent,
}

impl MockBehavior {
    pub fn example() -> Self {
        MockBehavior::Answer {
            ipv4: Ipv4Addr::new(93, 184, 216, 34),
            ipv6: "2606:2800:220:1::1".parse().unwrap(),
        }
    }
}

pub struct MockDnsServer {
    addr: SocketAddr,
    queries: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(behavior: MockBehavior) -> Self {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = socket.local_addr().unwrap();
        let queries = Arc::new(AtomicUsize::new(0));
        let counter = queries.clone();

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            counter.fetch_add(1, Ordering::SeqCst);
                            if let Some(response) = build_mock_response(&buf[..len], behavior) {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                }
            }
        });

        Self {
            addr,
            queries,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

fn build_mock_response(query: &[u8], behavior: MockBehavior) -> Option<Vec<u8>> {
    let request = Message::from_vec(query).ok()?;

    let id = match behavior {
        MockBehavior::Silent => return None,
        MockBehavior::WrongId => request.id().wrapping_add(1),
        _ => request.id(),
    };

    let mut response = Message::new(id, MessageType::Response, request.op_code());
    response.set_recursion_desired(request.recursion_desired());
    response.set_recursion_available(true);
    response.add_queries(request.queries().iter().cloned());

    match behavior {
        MockBehavior::Rcode(rcode) => {
            response.set_response_code(rcode);
        }
        MockBehavior::Answer { ipv4, ipv6 } => {
            for q in request.queries() {
                let rdata = match q.query_type() {
                    RecordType::A => RData::A(A(ipv4)),
                    RecordType::AAAA => RData::AAAA(AAAA(ipv6)),
                    _ => continue,
                };
                response.add_answer(Record::from_rdata(q.name().clone(), 60, rdata));
            }
        }
        _ => {}
    }

    response.to_bytes().ok()
}
