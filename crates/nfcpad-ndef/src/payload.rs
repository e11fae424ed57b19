use derive_more::Display;

use crate::record_type::RecordType;

/// Presentation ready payload of a record
///
/// The display form is what the log shows: the text itself, a hex dump with
/// a `[Hex]` marker, or the byte count when the data could not be decoded
#[derive(Debug, Clone, PartialEq, Eq, Hash, uniffi::Enum, Display)]
pub enum DecodedPayload {
    #[display("{_0}")]
    Text(String),

    #[display("[Hex] {_0}")]
    Hex(String),

    #[display("[Binary Data: {length} bytes]")]
    Binary { length: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct DecodedRecord {
    pub record_type: RecordType,
    pub media_type: Option<String>,
    pub id: Option<String>,

    /// Language tag of a text record, as reported by the platform
    pub lang: Option<String>,

    /// `None` when the record carried no data
    pub payload: Option<DecodedPayload>,
}

impl DecodedRecord {
    pub fn payload_string(&self) -> Option<String> {
        self.payload.as_ref().map(ToString::to_string)
    }
}

/// Text encodings a text record may declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString)]
#[strum(ascii_case_insensitive)]
pub enum TextEncoding {
    #[strum(serialize = "utf-8", serialize = "utf8")]
    Utf8,

    /// Plain `utf-16` is read big endian
    #[strum(serialize = "utf-16", serialize = "utf-16be")]
    Utf16Be,

    #[strum(serialize = "utf-16le")]
    Utf16Le,
}

#[uniffi::export]
fn decoded_payload_to_string(payload: DecodedPayload) -> String {
    payload.to_string()
}

#[cfg(test)]
mod tests {
    use std::str::FromStr as _;

    use super::*;

    #[test]
    fn payload_display() {
        assert_eq!(DecodedPayload::Text("hi".into()).to_string(), "hi");
        assert_eq!(DecodedPayload::Hex("0A:FF".into()).to_string(), "[Hex] 0A:FF");
        assert_eq!(DecodedPayload::Binary { length: 3 }.to_string(), "[Binary Data: 3 bytes]");
    }

    #[test]
    fn encoding_names() {
        assert_eq!(TextEncoding::from_str("UTF-8").unwrap(), TextEncoding::Utf8);
        assert_eq!(TextEncoding::from_str("utf-16").unwrap(), TextEncoding::Utf16Be);
        assert_eq!(TextEncoding::from_str("utf-16le").unwrap(), TextEncoding::Utf16Le);
        assert!(TextEncoding::from_str("latin1").is_err());
    }
}
