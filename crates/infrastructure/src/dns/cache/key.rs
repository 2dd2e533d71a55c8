use compact_str::CompactString;
use sinkhole_domain::AddressFamily;
use std::hash::{Hash, Hasher};

/// `(family, domain)` key. Domains up to 24 bytes stay inline.
#[derive(Clone, Debug, Eq)]
pub struct CacheKey {
    pub family: AddressFamily,
    pub domain: CompactString,
}

impl CacheKey {
    #[inline]
    pub fn new(family: AddressFamily, domain: &str) -> Self {
        Self {
            family,
            domain: CompactString::from(domain),
        }
    }
}

impl Hash for CacheKey {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.domain.as_str().hash(state);
        self.family.hash(state);
    }
}

impl PartialEq for CacheKey {
    #[inline]
    fn eq(&self, other: &CacheKey) -> bool {
        self.family == other.family && self.domain == other.domain
    }
}
