use std::fmt::Display;

/// The kind of an NDEF record as reported by the platform
///
/// The platform set is extensible: local types (`:foo`) and external types
/// (`example.com:foo`) carry their name
#[derive(Debug, Clone, Hash, PartialEq, Eq, uniffi::Enum)]
pub enum RecordType {
    Empty,
    Text,
    Url,
    SmartPoster,
    AbsoluteUrl,
    Mime,
    Unknown,
    Local(String),
    External(String),
}

impl RecordType {
    /// Text and URL records carry human readable payloads
    pub fn is_text_like(&self) -> bool {
        matches!(self, Self::Text | Self::Url)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Empty => "empty",
            Self::Text => "text",
            Self::Url => "url",
            Self::SmartPoster => "smart-poster",
            Self::AbsoluteUrl => "absolute-url",
            Self::Mime => "mime",
            Self::Unknown => "unknown",
            Self::Local(name) => name,
            Self::External(name) => name,
        }
    }
}

impl From<&str> for RecordType {
    fn from(value: &str) -> Self {
        match value {
            "empty" => Self::Empty,
            "text" => Self::Text,
            "url" => Self::Url,
            "smart-poster" => Self::SmartPoster,
            "absolute-url" => Self::AbsoluteUrl,
            "mime" => Self::Mime,
            "unknown" => Self::Unknown,
            local if local.starts_with(':') => Self::Local(local.to_string()),
            other => Self::External(other.to_string()),
        }
    }
}

impl From<String> for RecordType {
    fn from(value: String) -> Self {
        value.as_str().into()
    }
}

impl AsRef<str> for RecordType {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[uniffi::export]
fn record_type_from_name(name: String) -> RecordType {
    name.into()
}

#[uniffi::export]
fn record_type_name(record_type: RecordType) -> String {
    record_type.to_string()
}
