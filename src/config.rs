#[derive(Debug, Clone, PartialEq, Eq, Hash, uniffi::Record)]
pub struct NfcConfig {
    /// Discard tag readings the platform delivers after the scan was cancelled
    pub drop_late_readings: bool,

    /// Number of entries the scan log keeps, oldest are evicted first
    pub scan_log_capacity: u32,

    /// Tracing filter used when `RUST_LOG` is not set
    pub log_filter: String,
}

impl Default for NfcConfig {
    fn default() -> Self {
        Self {
            drop_late_readings: true,
            scan_log_capacity: 100,
            log_filter: "info".to_string(),
        }
    }
}

#[uniffi::export]
fn default_nfc_config() -> NfcConfig {
    NfcConfig::default()
}
