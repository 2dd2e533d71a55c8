pub mod dns;

pub use dns::start_dns_listeners;
