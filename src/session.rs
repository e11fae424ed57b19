//! One scan session: the caller owned cancellation handle, the sink the
//! platform reports tag taps to, and the stream the caller reads them from.

use std::{
    fmt::Debug,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use flume::{Receiver, Sender};
use nfcpad_ndef::{DecodedMessage, TagMessage, decode_message};
use parking_lot::Mutex;
use tracing::{debug, error, warn};

use crate::{
    error::{NfcError, Result},
    platform::PlatformError,
};

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, uniffi::Enum)]
pub enum SessionState {
    Idle,
    Scanning,
}

/// A tag tap as reported by the platform
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct TagReadEvent {
    pub message: TagMessage,
    pub serial_number: Option<String>,
    pub tech: Option<String>,
}

/// A tag tap with every record decoded, handed to the caller
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct TagReading {
    pub message: DecodedMessage,
    pub serial_number: Option<String>,
    pub tech: Option<String>,
}

impl From<TagReadEvent> for TagReading {
    fn from(event: TagReadEvent) -> Self {
        Self {
            message: decode_message(&event.message),
            serial_number: event.serial_number,
            tech: event.tech,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ScanEvent {
    Reading(TagReading),
    Failed(NfcError),

    /// Session was cancelled, only readings already queued follow
    Ended,
}

// MARK: ScanHandle

type AbortHook = Box<dyn FnOnce() + Send + 'static>;

#[derive(Default)]
struct HandleState {
    cancelled: bool,
    hooks: Vec<AbortHook>,
}

/// Cancellation handle for a scan, owned by the caller
///
/// Cancelling is idempotent, hooks registered by the session manager run once
#[derive(uniffi::Object)]
pub struct ScanHandle {
    state: Mutex<HandleState>,
}

impl Debug for ScanHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("ScanHandle")
            .field("cancelled", &state.cancelled)
            .field("hooks", &state.hooks.len())
            .finish()
    }
}

impl Default for ScanHandle {
    fn default() -> Self {
        Self::new()
    }
}

#[uniffi::export]
impl ScanHandle {
    #[uniffi::constructor]
    pub fn new() -> Self {
        Self { state: Mutex::new(HandleState::default()) }
    }

    pub fn cancel(&self) {
        let hooks = {
            let mut state = self.state.lock();
            if state.cancelled {
                return;
            }

            state.cancelled = true;
            std::mem::take(&mut state.hooks)
        };

        // run outside the lock, hooks may query the handle
        for hook in hooks {
            hook();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.state.lock().cancelled
    }
}

impl ScanHandle {
    /// Run `hook` when the handle is cancelled, right away if it already is
    pub(crate) fn on_cancel(&self, hook: impl FnOnce() + Send + 'static) {
        let mut state = self.state.lock();
        if state.cancelled {
            drop(state);
            hook();
            return;
        }

        state.hooks.push(Box::new(hook));
    }
}

// MARK: TagEventSink

/// Where the platform reports tag taps for one scan session
#[derive(Debug, uniffi::Object)]
pub struct TagEventSink {
    sender: Mutex<Option<Sender<ScanEvent>>>,
    handle: Arc<ScanHandle>,
    drop_late_readings: bool,
}

impl TagEventSink {
    pub(crate) fn new(
        handle: Arc<ScanHandle>,
        sender: Sender<ScanEvent>,
        drop_late_readings: bool,
    ) -> Self {
        Self { sender: Mutex::new(Some(sender)), handle, drop_late_readings }
    }

    /// Unregister the sink, the stream ends once drained
    pub(crate) fn close(&self) {
        if self.sender.lock().take().is_some() {
            debug!("scan sink closed");
        }
    }

    /// End the session on cancel
    ///
    /// Closes the sink when late readings are dropped, otherwise marks the end
    /// and keeps accepting readings the platform still delivers
    pub(crate) fn finish(&self) {
        if self.drop_late_readings {
            self.close();
            return;
        }

        if self.send(ScanEvent::Ended) {
            debug!("scan session ended, late readings still delivered");
        }
    }

    fn send(&self, event: ScanEvent) -> bool {
        let Some(sender) = self.sender.lock().clone() else {
            return false;
        };

        sender.send(event).is_ok()
    }
}

#[uniffi::export]
impl TagEventSink {
    /// A tag was read
    pub fn on_reading(&self, event: TagReadEvent) {
        if self.drop_late_readings && self.handle.is_cancelled() {
            warn!("dropping tag reading delivered after the scan was cancelled");
            return;
        }

        let reading = TagReading::from(event);
        debug!(
            "tag read, serial: {:?}, records: {}",
            reading.serial_number,
            reading.message.records.len()
        );

        if !self.send(ScanEvent::Reading(reading)) {
            debug!("scan stream closed, reading dropped");
        }
    }

    /// A tag was detected but could not be read, scanning continues
    pub fn on_reading_error(&self, message: String) {
        warn!("tag read error, still scanning: {message}");
    }

    /// The platform stopped scanning because of an error
    pub fn on_failure(&self, error: PlatformError) {
        error!("scan failed: {error}");

        self.send(ScanEvent::Failed(NfcError::from_scan(error)));
        self.handle.cancel();
    }
}

// MARK: ScanStream

/// The readings of one scan session, in the order the platform raised them
///
/// Yields an error once if the platform fails, ends when the session is
/// cancelled and can't be restarted
#[derive(Debug, uniffi::Object)]
pub struct ScanStream {
    receiver: Receiver<ScanEvent>,
    ended: AtomicBool,
}

impl ScanStream {
    pub(crate) fn new(receiver: Receiver<ScanEvent>) -> Self {
        Self { receiver, ended: AtomicBool::new(false) }
    }

    pub(crate) fn next_blocking(&self) -> Result<Option<TagReading>> {
        if self.ended.load(Ordering::Acquire) {
            return self.drain();
        }

        self.from_event(self.receiver.recv().ok())
    }

    fn from_event(&self, event: Option<ScanEvent>) -> Result<Option<TagReading>> {
        match event {
            Some(ScanEvent::Reading(reading)) => Ok(Some(reading)),
            Some(ScanEvent::Failed(error)) => Err(error),
            Some(ScanEvent::Ended) => {
                self.ended.store(true, Ordering::Release);
                self.drain()
            }
            None => Ok(None),
        }
    }

    /// After the session ended, hand out what is queued without waiting
    fn drain(&self) -> Result<Option<TagReading>> {
        loop {
            match self.receiver.try_recv() {
                Ok(ScanEvent::Reading(reading)) => return Ok(Some(reading)),
                Ok(ScanEvent::Failed(error)) => return Err(error),
                Ok(ScanEvent::Ended) => continue,
                Err(_) => return Ok(None),
            }
        }
    }
}

#[uniffi::export(async_runtime = "tokio")]
impl ScanStream {
    /// Wait for the next reading, `None` once the session has ended
    pub async fn next(&self) -> Result<Option<TagReading>> {
        if self.ended.load(Ordering::Acquire) {
            return self.drain();
        }

        self.from_event(self.receiver.recv_async().await.ok())
    }
}
