//! Logging settings carried by [`TestRailConfig`](super::TestRailConfig).

use serde::{Deserialize, Deserializer};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Verbosity of the client's log output.
///
/// Parsing is strict through [`FromStr`], while configuration loading is
/// lenient: unknown names fall back to [`LogLevel::Info`].
///
/// # Example
///
/// ```rust
/// use testrail_api::LogLevel;
///
/// assert_eq!("debug".parse::<LogLevel>().unwrap(), LogLevel::Debug);
/// assert!("verbose".parse::<LogLevel>().is_err());
/// assert_eq!(LogLevel::from_config_value("verbose"), LogLevel::Info);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// Only terminal failures.
    Error,
    /// Failures and warnings (e.g. missing credentials).
    Warn,
    /// General information.
    #[default]
    Info,
    /// Every request attempt and retry.
    Debug,
    /// Everything, including transport internals.
    Trace,
}

impl LogLevel {
    /// Returns the lowercase name used in configuration files and filters.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }

    /// Parses a configured level, defaulting to [`LogLevel::Info`] on
    /// unrecognized input.
    #[must_use]
    pub fn from_config_value(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a log level name is not recognized.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("Unknown log level '{0}'. Expected one of: error, warn, info, debug, trace.")]
pub struct UnknownLogLevel(pub String);

impl FromStr for LogLevel {
    type Err = UnknownLogLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            _ => Err(UnknownLogLevel(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from_config_value(&s))
    }
}

/// Where and how verbosely the client logs.
///
/// When `file` is `None` log records go to stderr.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log file, opened in append mode.
    #[serde(default)]
    pub file: Option<PathBuf>,
    /// Minimum level of records that are written.
    #[serde(default)]
    pub level: LogLevel,
}
