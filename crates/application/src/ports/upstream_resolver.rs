use async_trait::async_trait;
use hickory_proto::rr::Record;
use sinkhole_domain::{DomainError, RecordType};

/// Answer section returned by the upstream for one question.
#[derive(Debug, Clone, Default)]
pub struct UpstreamAnswer {
    pub answers: Vec<Record>,
}

#[async_trait]
pub trait UpstreamResolver: Send + Sync {
    /// Sends a recursion-desired query and returns the answer section.
    ///
    /// Timeouts, transport failures and non-success response codes are all
    /// reported as errors.
    async fn resolve(
        &self,
        domain: &str,
        record_type: RecordType,
    ) -> Result<UpstreamAnswer, DomainError>;
}
