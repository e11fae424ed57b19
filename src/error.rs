use crate::platform::PlatformError;

pub type Error = NfcError;
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, uniffi::Error)]
#[uniffi::export(Display)]
pub enum NfcError {
    #[error("NFC is not supported on this device")]
    CapabilityUnavailable,

    #[error("NFC permission denied: {0}")]
    CapabilityDenied(String),

    #[error("NFC operation failed: {0}")]
    OperationFailed(String),

    #[error("unable to write to tag: {0}")]
    WriteFailed(String),

    #[error("a media type is required for mime records")]
    MissingMediaType,

    #[error("a scan session is already active")]
    SessionAlreadyActive,

    #[error("the scan was cancelled before it started")]
    ScanAborted,
}

impl NfcError {
    /// Map a platform error raised while scanning
    pub fn from_scan(error: PlatformError) -> Self {
        match error {
            PlatformError::PermissionDenied(reason) => Self::CapabilityDenied(reason),
            PlatformError::NotSupported(_) => Self::CapabilityUnavailable,
            PlatformError::Failed(reason) => Self::OperationFailed(reason),
        }
    }

    /// Map a platform error raised while writing
    pub fn from_write(error: PlatformError) -> Self {
        match error {
            PlatformError::PermissionDenied(reason) => Self::CapabilityDenied(reason),
            PlatformError::NotSupported(_) => Self::CapabilityUnavailable,
            PlatformError::Failed(reason) => Self::WriteFailed(reason),
        }
    }
}
