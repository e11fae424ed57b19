pub mod config;
pub mod error;
pub mod logging;
pub mod manager;
pub mod platform;
pub mod scan_log;
pub mod session;

pub(crate) mod task;

pub use nfcpad_ndef as ndef;
pub use nfcpad_ndef::{
    DecodedMessage, DecodedPayload, DecodedRecord, RecordData, RecordInit, RecordType, TagMessage,
    TagMessageInit, TagRecord,
};

pub use config::NfcConfig;
pub use error::NfcError;
pub use manager::NfcSessionManager;
pub use platform::{NfcPlatform, PlatformError};
pub use scan_log::ScanLog;
pub use session::{ScanHandle, ScanStream, SessionState, TagReadEvent, TagReading};

uniffi::setup_scaffolding!();
