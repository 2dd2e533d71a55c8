use std::net::IpAddr;
use std::time::{Duration, Instant};

/// Cached address plus its deadline. `expires_at == None` is permanent.
#[derive(Debug, Clone, Copy)]
pub struct CachedAddress {
    pub address: IpAddr,
    pub expires_at: Option<Instant>,
}

impl CachedAddress {
    pub fn permanent(address: IpAddr) -> Self {
        Self {
            address,
            expires_at: None,
        }
    }

    pub fn learned(address: IpAddr, ttl_secs: u32, now: Instant) -> Self {
        Self {
            address,
            expires_at: Some(now + Duration::from_secs(u64::from(ttl_secs))),
        }
    }

    #[inline]
    pub fn is_permanent(&self) -> bool {
        self.expires_at.is_none()
    }

    #[inline]
    pub fn is_expired_at(&self, now: Instant) -> bool {
        matches!(self.expires_at, Some(deadline) if now >= deadline)
    }

    /// Whole seconds left, rounded up so a live entry never reports 0.
    pub fn remaining_ttl_at(&self, now: Instant) -> Option<u32> {
        self.expires_at.map(|deadline| {
            let left = deadline.saturating_duration_since(now);
            let secs = left.as_secs() + u64::from(left.subsec_nanos() > 0);
            u32::try_from(secs).unwrap_or(u32::MAX)
        })
    }
}
