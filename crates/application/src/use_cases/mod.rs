pub mod dns;
pub mod domain_lists;

// Re-export use cases
pub use dns::{HandleDnsQueryUseCase, QueryOutcome};
pub use domain_lists::{
    AllowDomainUseCase, BlockDomainUseCase, ImportBlocklistUseCase, ImportSummary,
    LoadDomainListsUseCase, PinDomainUseCase, RemoveDomainUseCase, SinkholeAddresses,
};
