pub mod codec;
pub mod message;
pub mod payload;
pub mod record;
pub mod record_type;

pub use codec::{DecodeError, data_view_to_hex, decode_message, decode_record};
pub use message::{DecodedMessage, TagMessage, TagMessageInit};
pub use payload::{DecodedPayload, DecodedRecord};
pub use record::{RecordData, RecordInit, TagRecord};
pub use record_type::RecordType;

uniffi::setup_scaffolding!();

mod ffi {
    use super::*;

    #[uniffi::export]
    fn decode_tag_record(record: TagRecord) -> DecodedRecord {
        decode_record(&record)
    }

    #[uniffi::export]
    fn bytes_to_hex(bytes: Vec<u8>) -> String {
        data_view_to_hex(&bytes)
    }
}
