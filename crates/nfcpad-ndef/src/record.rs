use crate::record_type::RecordType;

/// A single record as read from a tag, immutable once received
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct TagRecord {
    pub record_type: RecordType,

    /// Only present for mime records
    pub media_type: Option<String>,
    pub id: Option<String>,

    /// Text encoding reported for text records, `utf-8` when absent
    pub encoding: Option<String>,

    /// Language tag of a text record, e.g. `en`
    pub lang: Option<String>,

    pub data: Option<Vec<u8>>,
}

impl TagRecord {
    pub fn new(record_type: impl Into<RecordType>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            record_type: record_type.into(),
            media_type: None,
            id: None,
            encoding: None,
            lang: None,
            data: Some(data.into()),
        }
    }

    pub fn mime(media_type: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self { media_type: Some(media_type.into()), ..Self::new(RecordType::Mime, data) }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }
}

/// Payload of a record handed to the writer
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Enum)]
pub enum RecordData {
    /// Left for the platform to encode
    Text(String),

    /// Already encoded bytes
    Bytes(Vec<u8>),
}

/// A record to be written to a tag
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct RecordInit {
    pub record_type: RecordType,
    pub media_type: Option<String>,
    pub data: RecordData,
}

impl RecordInit {
    pub fn text(record_type: RecordType, text: impl Into<String>) -> Self {
        Self { record_type, media_type: None, data: RecordData::Text(text.into()) }
    }

    pub fn bytes(record_type: RecordType, bytes: impl Into<Vec<u8>>) -> Self {
        Self { record_type, media_type: None, data: RecordData::Bytes(bytes.into()) }
    }

    pub fn mime(media_type: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            record_type: RecordType::Mime,
            media_type: Some(media_type.into()),
            data: RecordData::Bytes(bytes.into()),
        }
    }
}
