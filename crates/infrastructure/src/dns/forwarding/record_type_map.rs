//! Conversion between `sinkhole_domain::RecordType` and hickory's record type.
//!
//! Both sides carry the raw type code, so unknown types map losslessly.

use hickory_proto::rr::RecordType as HickoryRecordType;
use sinkhole_domain::RecordType;

pub struct RecordTypeMapper;

impl RecordTypeMapper {
    pub fn to_hickory(record_type: RecordType) -> HickoryRecordType {
        HickoryRecordType::from(record_type.to_u16())
    }

    pub fn from_hickory(hickory_type: HickoryRecordType) -> RecordType {
        RecordType::from_u16(u16::from(hickory_type))
    }
}
