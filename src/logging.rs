//! Log output setup.
//!
//! The library only emits `tracing` records. Applications that have no
//! subscriber of their own can install one from the `[api_logging]` section
//! of the configuration with [`init`].
//!
//! # Example
//!
//! ```rust,ignore
//! use testrail_api::{logging, TestRailConfig};
//!
//! let config = TestRailConfig::load()?;
//! logging::init(config.logging())?;
//! ```

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogLevel, LoggingConfig};
use crate::error::ConfigError;

/// Level applied to records of other crates (HTTP stack, runtime).
const DEPENDENCY_LEVEL: &str = "warn";

/// Builds the filter directive for the given level.
///
/// The level applies to this crate; dependencies only report warnings and
/// errors.
#[must_use]
pub fn filter_directive(level: LogLevel) -> String {
    format!(
        "{DEPENDENCY_LEVEL},{}={}",
        env!("CARGO_CRATE_NAME"),
        level.as_str()
    )
}

/// Installs a global subscriber writing to the configured log file, or to
/// stderr when no file is set.
///
/// The log file is created if needed and appended to.
///
/// # Errors
///
/// Returns [`ConfigError::LoggingInit`] if the log file cannot be opened or
/// a global subscriber is already installed.
pub fn init(config: &LoggingConfig) -> Result<(), ConfigError> {
    let filter = EnvFilter::try_new(filter_directive(config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match &config.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|err| ConfigError::LoggingInit {
                    reason: format!("cannot open log file '{}': {err}", path.display()),
                })?;
            registry
                .with(
                    fmt::layer()
                        .with_ansi(false)
                        .with_target(false)
                        .with_writer(Mutex::new(file)),
                )
                .try_init()
        }
        None => registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init(),
    };

    installed.map_err(|err| ConfigError::LoggingInit {
        reason: err.to_string(),
    })?;

    let sink = config
        .file
        .as_ref()
        .map_or_else(|| "stderr".to_string(), |path| path.display().to_string());
    tracing::info!(level = %config.level, %sink, "API logging initialized");
    Ok(())
}
