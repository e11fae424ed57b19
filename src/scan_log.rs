//! Ephemeral log of what happened during a session, newest entries last.

use std::collections::VecDeque;

use jiff::Timestamp;
use nfcpad_ndef::{DecodedRecord, RecordData, TagMessageInit, data_view_to_hex};
use parking_lot::Mutex;

use crate::{config::NfcConfig, session::TagReading};

#[derive(Debug, Clone, PartialEq, Eq, uniffi::Enum)]
pub enum LogEntryKind {
    Reading(TagReading),
    Written(TagMessageInit),
    ReadError(String),
    Status(String),
}

#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct LogEntry {
    /// Milliseconds since the Unix epoch
    pub timestamp_ms: i64,
    pub kind: LogEntryKind,
}

impl LogEntry {
    fn now(kind: LogEntryKind) -> Self {
        Self { timestamp_ms: Timestamp::now().as_millisecond(), kind }
    }

    /// Lines to show for this entry
    pub fn lines(&self) -> Vec<String> {
        match &self.kind {
            LogEntryKind::Reading(reading) => reading_lines(reading),
            LogEntryKind::Written(message) => written_lines(message),
            LogEntryKind::ReadError(message) => vec![format!("Read error: {message}")],
            LogEntryKind::Status(message) => vec![message.clone()],
        }
    }
}

fn reading_lines(reading: &TagReading) -> Vec<String> {
    let mut lines = Vec::with_capacity(reading.message.records.len() + 3);

    if let Some(serial_number) = &reading.serial_number {
        lines.push(format!("Serial: {serial_number}"));
    }

    if let Some(tech) = &reading.tech {
        lines.push(format!("Tech: {tech}"));
    }

    lines.push(format!("Records: {}", reading.message.records.len()));
    lines.extend(
        reading.message.records.iter().enumerate().map(|(index, record)| record_line(index, record)),
    );

    lines
}

fn record_line(index: usize, record: &DecodedRecord) -> String {
    let kind = match &record.media_type {
        Some(media_type) => format!("{} ({media_type})", record.record_type),
        None => record.record_type.to_string(),
    };

    match record.payload_string() {
        Some(payload) => format!("#{} {kind}: {payload}", index + 1),
        None => format!("#{} {kind}", index + 1),
    }
}

fn written_lines(message: &TagMessageInit) -> Vec<String> {
    let mut lines = vec![format!("Wrote {} record(s)", message.records.len())];

    lines.extend(message.records.iter().enumerate().map(|(index, record)| {
        let kind = match &record.media_type {
            Some(media_type) => format!("{} ({media_type})", record.record_type),
            None => record.record_type.to_string(),
        };

        let data = match &record.data {
            RecordData::Text(text) => text.clone(),
            RecordData::Bytes(bytes) => match std::str::from_utf8(bytes) {
                Ok(text) => text.to_string(),
                Err(_) => format!("[Hex] {}", data_view_to_hex(bytes)),
            },
        };

        format!("#{} {kind}: {data}", index + 1)
    }));

    lines
}

/// Bounded in-memory log, the oldest entry is evicted once full
#[derive(Debug, uniffi::Object)]
pub struct ScanLog {
    capacity: usize,
    entries: Mutex<VecDeque<LogEntry>>,
}

impl Default for ScanLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanLog {
    fn push(&self, kind: LogEntryKind) {
        if self.capacity == 0 {
            return;
        }

        let mut entries = self.entries.lock();
        while entries.len() >= self.capacity {
            entries.pop_front();
        }

        entries.push_back(LogEntry::now(kind));
    }
}

#[uniffi::export]
impl ScanLog {
    #[uniffi::constructor]
    pub fn new() -> Self {
        Self::with_config(NfcConfig::default())
    }

    #[uniffi::constructor]
    pub fn with_config(config: NfcConfig) -> Self {
        let capacity = config.scan_log_capacity as usize;
        Self { capacity, entries: Mutex::new(VecDeque::with_capacity(capacity)) }
    }

    pub fn log_reading(&self, reading: TagReading) {
        self.push(LogEntryKind::Reading(reading));
    }

    pub fn log_written(&self, message: TagMessageInit) {
        self.push(LogEntryKind::Written(message));
    }

    pub fn log_error(&self, message: String) {
        self.push(LogEntryKind::ReadError(message));
    }

    pub fn log_status(&self, message: String) {
        self.push(LogEntryKind::Status(message));
    }

    /// All entries, oldest first
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().iter().cloned().collect()
    }

    pub fn len(&self) -> u32 {
        self.entries.lock().len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

#[uniffi::export]
fn log_entry_lines(entry: LogEntry) -> Vec<String> {
    entry.lines()
}
