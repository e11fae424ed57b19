use crate::{
    payload::DecodedRecord,
    record::{RecordInit, TagRecord},
};

/// Records read from a tag, in the order the platform reported them
#[derive(Debug, Clone, Default, PartialEq, Eq, uniffi::Record)]
pub struct TagMessage {
    pub records: Vec<TagRecord>,
}

/// A [`TagMessage`] with every record decoded, order preserved
#[derive(Debug, Clone, Default, PartialEq, Eq, uniffi::Record)]
pub struct DecodedMessage {
    pub records: Vec<DecodedRecord>,
}

/// Records to write to a tag, in authoring order
#[derive(Debug, Clone, Default, PartialEq, Eq, uniffi::Record)]
pub struct TagMessageInit {
    pub records: Vec<RecordInit>,
}

impl TagMessage {
    pub fn new(records: Vec<TagRecord>) -> Self {
        Self { records }
    }
}

impl TagMessageInit {
    pub fn new(records: Vec<RecordInit>) -> Self {
        Self { records }
    }

    pub fn single(record: RecordInit) -> Self {
        Self { records: vec![record] }
    }
}

impl From<Vec<TagRecord>> for TagMessage {
    fn from(records: Vec<TagRecord>) -> Self {
        Self::new(records)
    }
}
