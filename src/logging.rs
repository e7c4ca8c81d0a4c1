//! Logging setup.
//!
//! Initializes a `tracing-subscriber` writing to stderr or to an append-mode
//! file. The configured level wins over `RUST_LOG`, which wins over the
//! default `warn`. A level of `off` leaves logging uninitialized.

use std::sync::OnceLock;
use tracing_subscriber::{
    fmt::{self, time::SystemTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::BridgeConfig;

static LOGGING_INITIALIZED: OnceLock<()> = OnceLock::new();

const TARGET: &str = "cassandra_bridge_rs";

/// Log settings taken from the connect string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogConfig {
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`.
    pub level: Option<String>,
    /// Log file path; stderr when unset.
    pub file: Option<String>,
}

impl From<&BridgeConfig> for LogConfig {
    fn from(config: &BridgeConfig) -> Self {
        Self {
            level: config.log_level.clone(),
            file: config.log_file.clone(),
        }
    }
}

impl LogConfig {
    fn is_off(&self) -> bool {
        self.level
            .as_deref()
            .is_some_and(|level| level.eq_ignore_ascii_case("off"))
    }

    fn filter(&self) -> EnvFilter {
        match &self.level {
            Some(level) => EnvFilter::new(format!("{}={}", TARGET, level.to_lowercase())),
            None => EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("{}=warn", TARGET))),
        }
    }
}

/// Install the subscriber. Only the first call per process has any effect.
pub fn init_logging(config: &LogConfig) {
    LOGGING_INITIALIZED.get_or_init(|| {
        if config.is_off() {
            return;
        }
        let filter = config.filter();

        if let Some(path) = &config.file {
            let file = match std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
            {
                Ok(f) => f,
                Err(e) => {
                    eprintln!("cassandra-bridge: failed to open log file {}: {}", path, e);
                    return;
                }
            };

            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_writer(file)
                        .with_ansi(false)
                        .with_timer(SystemTime),
                )
                .try_init()
                .ok();
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_timer(SystemTime),
                )
                .try_init()
                .ok();
        }
    });
}
