use tracing_subscriber::{EnvFilter, fmt};

use crate::config::NfcConfig;

/// Install the global tracing subscriber, `RUST_LOG` wins over the config's
/// `log_filter`
///
/// Safe to call more than once, later calls are ignored
#[uniffi::export(default(config = None))]
pub fn init_logging(config: Option<NfcConfig>) {
    let config = config.unwrap_or_default();
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    let filter = env_filter(rust_log, &config);
    if fmt().with_env_filter(filter).with_target(false).try_init().is_err() {
        tracing::debug!("logging already initialized");
    }
}

fn env_filter(rust_log: Option<String>, config: &NfcConfig) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(&config.log_filter))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tracing_subscriber::filter::LevelFilter;

    use super::*;

    #[test]
    fn config_filter_used_without_rust_log() {
        let config = NfcConfig { log_filter: "debug".to_string(), ..NfcConfig::default() };
        assert_eq!(env_filter(None, &config).max_level_hint(), Some(LevelFilter::DEBUG));

        let default = env_filter(None, &NfcConfig::default());
        assert_eq!(default.max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn rust_log_wins_over_config() {
        let config = NfcConfig { log_filter: "debug".to_string(), ..NfcConfig::default() };
        let filter = env_filter(Some("warn".to_string()), &config);

        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
    }
}
