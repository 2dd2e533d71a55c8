use serde::{Deserialize, Serialize};

use crate::dns_request::normalize_domain;
use crate::errors::DomainError;

const MAX_DOMAIN_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// A persisted black/white list decision for one domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEntry {
    pub domain: String,
    pub allow: bool,
}

impl ListEntry {
    pub fn blocked(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            allow: false,
        }
    }

    pub fn allowed(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            allow: true,
        }
    }
}

/// Normalizes a user-supplied domain and checks it is a plausible hostname.
pub fn parse_list_domain(raw: &str) -> Result<String, DomainError> {
    let domain = normalize_domain(raw.trim());

    if domain.is_empty() || domain.len() > MAX_DOMAIN_LEN {
        return Err(DomainError::InvalidDomainName(raw.to_string()));
    }

    let labels_ok = domain.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= MAX_LABEL_LEN
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
    });

    if !labels_ok {
        return Err(DomainError::InvalidDomainName(raw.to_string()));
    }

    Ok(domain)
}
