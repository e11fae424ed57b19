//! The NFC radio as seen from the library.
//!
//! The host shell implements [`NfcPlatform`] on top of whatever the device
//! offers (Web NFC, Android `NfcAdapter`, Core NFC) and hands it to
//! [`crate::manager::NfcSessionManager`].

#[cfg(test)]
pub mod mock;

use std::sync::Arc;

use nfcpad_ndef::TagMessageInit;

use crate::session::{ScanHandle, TagEventSink};

#[uniffi::export(callback_interface)]
pub trait NfcPlatform: Send + Sync + std::fmt::Debug + 'static {
    /// Whether the device can read tags at all
    fn has_tag_reader(&self) -> bool;

    /// Whether the device can write tags
    fn has_tag_writer(&self) -> bool;

    /// Start scanning, returns once the radio is listening
    ///
    /// Every tag tap must be reported to `sink` until [`NfcPlatform::stop_scan`] is called
    /// or `handle` is cancelled
    fn scan(&self, handle: Arc<ScanHandle>, sink: Arc<TagEventSink>) -> Result<(), PlatformError>;

    /// Stop scanning and drop the sink handed to [`NfcPlatform::scan`]
    fn stop_scan(&self);

    /// Write the message to the next tag presented, returns once written
    fn write(&self, message: TagMessageInit) -> Result<(), PlatformError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, uniffi::Error)]
pub enum PlatformError {
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("not supported: {0}")]
    NotSupported(String),

    #[error("{0}")]
    Failed(String),
}

impl From<uniffi::UnexpectedUniFFICallbackError> for PlatformError {
    fn from(error: uniffi::UnexpectedUniFFICallbackError) -> Self {
        Self::Failed(error.reason)
    }
}
