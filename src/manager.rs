use std::sync::{Arc, Weak};

use nfcpad_ndef::{RecordInit, RecordType, TagMessageInit};
use parking_lot::Mutex;
use tracing::{debug, error, warn};

use crate::{
    config::NfcConfig,
    error::{NfcError, Result},
    platform::NfcPlatform,
    session::{ScanHandle, ScanStream, SessionState, TagEventSink, TagReading},
    task,
};

pub const DEMO_TEXT: &str = "Hello from nfcpad";
pub const DEMO_URL: &str = "https://example.com";
pub const DEMO_MIME_TYPE: &str = "text/plain";
pub const DEMO_MIME_PAYLOAD: &str = "Multi-record demo payload";

#[uniffi::export(callback_interface)]
pub trait ReadingListener: Send + Sync + std::fmt::Debug + 'static {
    /// Called once per tag tap, in the order the platform raised them
    fn on_reading(&self, reading: TagReading);

    /// Called once if the platform stops scanning because of an error
    fn on_scan_failed(&self, error: NfcError);
}

#[derive(Debug)]
struct Shared {
    platform: Box<dyn NfcPlatform>,
    active: Mutex<Option<Arc<ScanHandle>>>,
    config: NfcConfig,
}

impl Shared {
    /// Make `handle` the active session, only one may scan at a time
    ///
    /// The slot stays taken until the session's abort hook has run, a handle
    /// cancelled while the platform is still starting keeps holding it
    fn claim(&self, handle: &Arc<ScanHandle>) -> Result<()> {
        let mut active = self.active.lock();
        if active.is_some() {
            return Err(NfcError::SessionAlreadyActive);
        }

        *active = Some(handle.clone());
        Ok(())
    }

    fn holds(&self, handle: &ScanHandle) -> bool {
        self.active.lock().as_deref().is_some_and(|current| std::ptr::eq(current, handle))
    }

    fn release(&self, handle: &ScanHandle) {
        let mut active = self.active.lock();
        if active.as_deref().is_some_and(|current| std::ptr::eq(current, handle)) {
            *active = None;
        }
    }
}

/// Owns the scan session lifecycle and writes to tags through the platform
#[derive(Debug, uniffi::Object)]
pub struct NfcSessionManager {
    shared: Arc<Shared>,
}

impl NfcSessionManager {
    fn abort_hook(
        &self,
        handle: &Arc<ScanHandle>,
        sink: &Arc<TagEventSink>,
    ) -> impl FnOnce() + Send + 'static {
        let shared: Weak<Shared> = Arc::downgrade(&self.shared);
        let handle: Weak<ScanHandle> = Arc::downgrade(handle);
        let sink = Arc::downgrade(sink);

        move || {
            if let Some(sink) = sink.upgrade() {
                sink.finish();
            }

            let (Some(shared), Some(handle)) = (shared.upgrade(), handle.upgrade()) else {
                return;
            };

            // only the session holding the slot may stop the radio
            if !shared.holds(&handle) {
                warn!("abort hook ran for a session that is no longer active");
                return;
            }

            shared.platform.stop_scan();
            shared.release(&handle);
            debug!("scan session stopped");
        }
    }

    async fn write_message(&self, message: TagMessageInit) -> Result<TagMessageInit> {
        if !self.shared.platform.has_tag_writer() {
            return Err(NfcError::CapabilityUnavailable);
        }

        debug!("writing message with {} record(s)", message.records.len());

        let shared = self.shared.clone();
        let to_write = message.clone();
        task::run_blocking(move || shared.platform.write(to_write))
            .await
            .map_err(|join_error| NfcError::WriteFailed(join_error.to_string()))?
            .map_err(NfcError::from_write)
            .inspect_err(|error| error!("write failed: {error}"))?;

        Ok(message)
    }
}

#[uniffi::export(async_runtime = "tokio")]
impl NfcSessionManager {
    #[uniffi::constructor]
    pub fn new(platform: Box<dyn NfcPlatform>) -> Self {
        Self::with_config(platform, NfcConfig::default())
    }

    #[uniffi::constructor]
    pub fn with_config(platform: Box<dyn NfcPlatform>, config: NfcConfig) -> Self {
        let shared = Shared { platform, active: Mutex::new(None), config };
        Self { shared: Arc::new(shared) }
    }

    /// Whether the device can scan tags, check before offering scan controls
    pub fn is_supported(&self) -> bool {
        self.shared.platform.has_tag_reader()
    }

    pub fn state(&self) -> SessionState {
        match self.shared.active.lock().as_ref() {
            Some(handle) if !handle.is_cancelled() => SessionState::Scanning,
            _ => SessionState::Idle,
        }
    }

    pub fn config(&self) -> NfcConfig {
        self.shared.config.clone()
    }

    /// Start scanning, resolves once the platform is listening
    ///
    /// The session lasts until `handle` is cancelled, the returned stream ends then
    pub async fn start_scan(&self, handle: Arc<ScanHandle>) -> Result<Arc<ScanStream>> {
        if !self.shared.platform.has_tag_reader() {
            return Err(NfcError::CapabilityUnavailable);
        }

        if handle.is_cancelled() {
            return Err(NfcError::ScanAborted);
        }

        self.shared.claim(&handle)?;

        let (sender, receiver) = flume::unbounded();
        let sink = Arc::new(TagEventSink::new(
            handle.clone(),
            sender,
            self.shared.config.drop_late_readings,
        ));

        let shared = self.shared.clone();
        let (scan_handle, scan_sink) = (handle.clone(), sink.clone());
        let started = task::run_blocking(move || shared.platform.scan(scan_handle, scan_sink))
            .await
            .map_err(|join_error| NfcError::OperationFailed(join_error.to_string()))
            .and_then(|result| result.map_err(NfcError::from_scan));

        if let Err(error) = started {
            error!("unable to start scan: {error}");
            sink.close();
            self.shared.release(&handle);
            return Err(error);
        }

        // cancelled while the platform was starting, the hook runs right away
        handle.on_cancel(self.abort_hook(&handle, &sink));
        debug!("scan session started");

        Ok(Arc::new(ScanStream::new(receiver)))
    }

    /// Start scanning and forward every reading to `listener`
    pub async fn start_scan_with_listener(
        &self,
        handle: Arc<ScanHandle>,
        listener: Box<dyn ReadingListener>,
    ) -> Result<()> {
        let stream = self.start_scan(handle).await?;

        std::thread::spawn(move || {
            loop {
                match stream.next_blocking() {
                    Ok(Some(reading)) => listener.on_reading(reading),
                    Ok(None) => break,
                    Err(error) => listener.on_scan_failed(error),
                }
            }

            debug!("reading listener finished");
        });

        Ok(())
    }

    /// Cancel the session, a no-op without a handle or when already stopped
    #[uniffi::method(default(handle = None))]
    pub fn stop_scan(&self, handle: Option<Arc<ScanHandle>>) {
        match handle {
            Some(handle) => handle.cancel(),
            None => debug!("stop requested without a scan handle"),
        }
    }

    /// Write a single record, resolves with the message that was sent
    #[uniffi::method(default(media_type = None))]
    pub async fn write_nfc(
        &self,
        record_type: RecordType,
        payload: String,
        media_type: Option<String>,
    ) -> Result<TagMessageInit> {
        let record = build_record(record_type, payload, media_type)?;
        self.write_message(TagMessageInit::single(record)).await
    }

    /// Write the fixed text, url and mime demo message
    pub async fn write_multi_demo(&self) -> Result<TagMessageInit> {
        self.write_message(demo_message()).await
    }
}

/// Build the record to write for `record_type`
///
/// Mime and unknown payloads are encoded to UTF-8 here, everything else is
/// left for the platform to encode
pub fn build_record(
    record_type: RecordType,
    payload: String,
    media_type: Option<String>,
) -> Result<RecordInit> {
    match record_type {
        RecordType::Mime => {
            let media_type = media_type
                .filter(|media_type| !media_type.trim().is_empty())
                .ok_or(NfcError::MissingMediaType)?;

            Ok(RecordInit::mime(media_type, payload.into_bytes()))
        }

        RecordType::Unknown => Ok(RecordInit::bytes(RecordType::Unknown, payload.into_bytes())),

        other => {
            if media_type.is_some() {
                warn!("ignoring media type for {other} record");
            }

            Ok(RecordInit::text(other, payload))
        }
    }
}

pub fn demo_message() -> TagMessageInit {
    TagMessageInit::new(vec![
        RecordInit::text(RecordType::Text, DEMO_TEXT),
        RecordInit::text(RecordType::Url, DEMO_URL),
        RecordInit::mime(DEMO_MIME_TYPE, DEMO_MIME_PAYLOAD.as_bytes()),
    ])
}
