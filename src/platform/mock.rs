use std::sync::Arc;

use flume::{Receiver, Sender};
use nfcpad_ndef::TagMessageInit;
use parking_lot::Mutex;

use super::{NfcPlatform, PlatformError};
use crate::session::{ScanHandle, TagEventSink};

#[derive(Debug, Default)]
struct MockState {
    reader: bool,
    writer: bool,
    scan_error: Option<PlatformError>,
    write_error: Option<PlatformError>,
    scans: u32,
    stops: u32,
    sink: Option<Arc<TagEventSink>>,
    written: Vec<TagMessageInit>,
    scan_gate: Option<(Sender<()>, Receiver<()>)>,
}

/// In-memory platform, tests drive tag taps through [`MockPlatform::sink`]
#[derive(Debug, Clone)]
pub struct MockPlatform(Arc<Mutex<MockState>>);

impl MockPlatform {
    pub fn new() -> Self {
        let state = MockState { reader: true, writer: true, ..MockState::default() };
        Self(Arc::new(Mutex::new(state)))
    }

    pub fn unsupported() -> Self {
        Self(Arc::new(Mutex::new(MockState::default())))
    }

    /// Reject the next scan request
    pub fn fail_scan(&self, error: PlatformError) {
        self.0.lock().scan_error = Some(error);
    }

    /// Reject the next write
    pub fn fail_write(&self, error: PlatformError) {
        self.0.lock().write_error = Some(error);
    }

    /// Hold the next scan inside the platform call
    ///
    /// The first receiver fires once the scan has started, the scan returns
    /// when the sender fires
    pub fn hold_scan(&self) -> (Receiver<()>, Sender<()>) {
        let (entered_tx, entered_rx) = flume::bounded(1);
        let (release_tx, release_rx) = flume::bounded(1);
        self.0.lock().scan_gate = Some((entered_tx, release_rx));

        (entered_rx, release_tx)
    }

    pub fn sink(&self) -> Option<Arc<TagEventSink>> {
        self.0.lock().sink.clone()
    }

    pub fn scan_count(&self) -> u32 {
        self.0.lock().scans
    }

    pub fn stop_count(&self) -> u32 {
        self.0.lock().stops
    }

    pub fn written(&self) -> Vec<TagMessageInit> {
        self.0.lock().written.clone()
    }
}

impl NfcPlatform for MockPlatform {
    fn has_tag_reader(&self) -> bool {
        self.0.lock().reader
    }

    fn has_tag_writer(&self) -> bool {
        self.0.lock().writer
    }

    fn scan(&self, _handle: Arc<ScanHandle>, sink: Arc<TagEventSink>) -> Result<(), PlatformError> {
        let gate = {
            let mut state = self.0.lock();
            if let Some(error) = state.scan_error.take() {
                return Err(error);
            }

            state.scans += 1;
            state.sink = Some(sink);
            state.scan_gate.take()
        };

        if let Some((entered, release)) = gate {
            let _ = entered.send(());
            let _ = release.recv();
        }

        Ok(())
    }

    fn stop_scan(&self) {
        let mut state = self.0.lock();
        state.stops += 1;
        state.sink = None;
    }

    fn write(&self, message: TagMessageInit) -> Result<(), PlatformError> {
        let mut state = self.0.lock();
        if let Some(error) = state.write_error.take() {
            return Err(error);
        }

        state.written.push(message);
        Ok(())
    }
}
