//! Turns raw tag records into values a UI can show.
//!
//! Everything here is total: a record that can't be decoded still produces a
//! [`DecodedRecord`], with a [`DecodedPayload::Binary`] payload naming its
//! length.

use std::str::FromStr as _;

use itertools::Itertools as _;
use tracing::debug;

use crate::{
    message::{DecodedMessage, TagMessage},
    payload::{DecodedPayload, DecodedRecord, TextEncoding},
    record::TagRecord,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid utf-8 sequence: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error("invalid utf-16 sequence")]
    InvalidUtf16,

    #[error("unsupported text encoding: {0}")]
    UnsupportedEncoding(String),
}

pub fn decode_record(record: &TagRecord) -> DecodedRecord {
    let payload = record.data.as_deref().map(|data| decode_payload(record, data));

    DecodedRecord {
        record_type: record.record_type.clone(),
        media_type: record.media_type.clone(),
        id: record.id.clone(),
        lang: record.lang.clone(),
        payload,
    }
}

pub fn decode_message(message: &TagMessage) -> DecodedMessage {
    DecodedMessage { records: message.records.iter().map(decode_record).collect() }
}

/// Uppercase hex pairs joined with `:`, `[0x0A, 0xFF]` becomes `0A:FF`
pub fn data_view_to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|byte| hex::encode_upper([*byte])).join(":")
}

fn decode_payload(record: &TagRecord, data: &[u8]) -> DecodedPayload {
    let decoded = if is_text_payload(record) {
        decode_text(data, record.encoding.as_deref()).map(DecodedPayload::Text)
    } else {
        Ok(DecodedPayload::Hex(data_view_to_hex(data)))
    };

    decoded.unwrap_or_else(|error| {
        debug!("unable to decode {} record, falling back to length: {error}", record.record_type);
        DecodedPayload::Binary { length: data.len() as u64 }
    })
}

fn is_text_payload(record: &TagRecord) -> bool {
    record.record_type.is_text_like()
        || record.media_type.as_deref().is_some_and(|media_type| media_type.starts_with("text/"))
}

fn decode_text(data: &[u8], encoding: Option<&str>) -> Result<String, DecodeError> {
    let encoding = match encoding {
        None => TextEncoding::Utf8,
        Some(name) => TextEncoding::from_str(name)
            .map_err(|_| DecodeError::UnsupportedEncoding(name.to_string()))?,
    };

    match encoding {
        TextEncoding::Utf8 => Ok(std::str::from_utf8(data)?.to_string()),
        TextEncoding::Utf16Be => decode_utf16(data, u16::from_be_bytes),
        TextEncoding::Utf16Le => decode_utf16(data, u16::from_le_bytes),
    }
}

fn decode_utf16(data: &[u8], to_unit: fn([u8; 2]) -> u16) -> Result<String, DecodeError> {
    let chunks = data.chunks_exact(2);
    if !chunks.remainder().is_empty() {
        return Err(DecodeError::InvalidUtf16);
    }

    let units = chunks.map(|chunk| to_unit([chunk[0], chunk[1]])).collect::<Vec<u16>>();
    String::from_utf16(&units).map_err(|_| DecodeError::InvalidUtf16)
}
