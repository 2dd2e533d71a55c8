pub mod address_family;
pub mod record_type;

pub use address_family::AddressFamily;
pub use record_type::RecordType;
