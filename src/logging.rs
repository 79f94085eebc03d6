/// Structured logging for the heat index monitoring service
///
/// Thin layer over `tracing` that tags every event with the subsystem it
/// came from and, where relevant, the station name. `init_logger` installs a
/// `tracing-subscriber` pipeline writing to stderr and optionally appending
/// to a log file.

use std::fmt;
use std::fs::OpenOptions;
use std::str::FromStr;
use std::sync::Mutex;

use tracing_subscriber::fmt as tracing_fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::model::HeatmonError;

// ---------------------------------------------------------------------------
// Log Levels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// Directive understood by `EnvFilter`.
    fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warning => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

impl FromStr for LogLevel {
    type Err = HeatmonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" | "trace" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            other => Err(HeatmonError::Config(format!("unknown log level '{}'", other))),
        }
    }
}

// ---------------------------------------------------------------------------
// Event Sources
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Classifier,
    Stations,
    Dashboard,
    Config,
    System,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Classifier => write!(f, "CLASSIFY"),
            Source::Stations => write!(f, "STATIONS"),
            Source::Dashboard => write!(f, "DASH"),
            Source::Config => write!(f, "CONFIG"),
            Source::System => write!(f, "SYS"),
        }
    }
}

// ---------------------------------------------------------------------------
// Failure Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureType {
    /// Bad data from a station; the rest of the list is still usable
    Expected,
    /// Environment or configuration problem
    Unexpected,
    /// Cannot tell from the error alone
    Unknown,
}

impl fmt::Display for FailureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureType::Expected => write!(f, "EXPECTED"),
            FailureType::Unexpected => write!(f, "UNEXPECTED"),
            FailureType::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Classify a failure by the kind of error that caused it
pub fn classify_failure(err: &HeatmonError) -> FailureType {
    match err {
        HeatmonError::InvalidInput(_) | HeatmonError::InvalidStation { .. } => {
            FailureType::Expected
        }
        HeatmonError::Io(_) | HeatmonError::Config(_) => FailureType::Unexpected,
        _ => FailureType::Unknown,
    }
}

// ---------------------------------------------------------------------------
// Logger Initialization
// ---------------------------------------------------------------------------

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `min_level` when set. Fails if the log
/// file cannot be opened or a subscriber is already installed.
pub fn init_logger(
    min_level: LogLevel,
    log_file: Option<&str>,
    console_timestamps: bool,
) -> Result<(), HeatmonError> {
    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    let console = tracing_fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);
    if console_timestamps {
        layers.push(console.boxed());
    } else {
        layers.push(console.without_time().boxed());
    }

    if let Some(path) = log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        layers.push(
            tracing_fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .boxed(),
        );
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(min_level.as_directive()));

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .map_err(|e| HeatmonError::Config(format!("failed to install logger: {}", e)))
}

// ---------------------------------------------------------------------------
// Public Logging Functions
// ---------------------------------------------------------------------------

/// Log a general informational message
pub fn info(source: Source, station: Option<&str>, message: &str) {
    tracing::info!(source = %source, station = station.unwrap_or("-"), "{}", message);
}

/// Log a warning message
pub fn warn(source: Source, station: Option<&str>, message: &str) {
    tracing::warn!(source = %source, station = station.unwrap_or("-"), "{}", message);
}

/// Log an error message
pub fn error(source: Source, station: Option<&str>, message: &str) {
    tracing::error!(source = %source, station = station.unwrap_or("-"), "{}", message);
}

/// Log a debug message
pub fn debug(source: Source, station: Option<&str>, message: &str) {
    tracing::debug!(source = %source, station = station.unwrap_or("-"), "{}", message);
}

// ---------------------------------------------------------------------------
// Structured Failure Logging
// ---------------------------------------------------------------------------

/// Log a failed operation, picking the level from the failure type
pub fn log_failure(source: Source, station: Option<&str>, operation: &str, err: &HeatmonError) {
    let failure_type = classify_failure(err);
    let message = format!("{} failed [{}]: {}", operation, failure_type, err);

    match failure_type {
        FailureType::Expected => warn(source, station, &message),
        FailureType::Unexpected => error(source, station, &message),
        FailureType::Unknown => warn(source, station, &message),
    }
}

/// Log a summary of a bulk operation over a station list
pub fn log_summary(source: Source, operation: &str, total: usize, successful: usize, failed: usize) {
    let message = format!(
        "{} complete: {}/{} successful, {} failed",
        operation, successful, total, failed
    );

    if failed == 0 {
        info(source, None, &message);
    } else if successful == 0 {
        error(source, None, &message);
    } else {
        warn(source, None, &message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warning);
        assert!(LogLevel::Warning < LogLevel::Error);
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!("INFO".parse::<LogLevel>().unwrap(), LogLevel::Info);
        assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warning);
        assert_eq!(" trace ".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_failure_classification() {
        assert_eq!(classify_failure(&HeatmonError::InvalidInput(f64::NAN)), FailureType::Expected);
        assert_eq!(
            classify_failure(&HeatmonError::Config("bad".to_string())),
            FailureType::Unexpected
        );
        assert_eq!(
            classify_failure(&HeatmonError::UnknownStation("x".to_string())),
            FailureType::Unknown
        );
    }

    #[test]
    fn test_logging_without_subscriber_is_a_no_op() {
        // Library code logs unconditionally; with no subscriber installed
        // these must not panic.
        info(Source::System, None, "hello");
        log_failure(
            Source::Classifier,
            Some("Iba, Zambales"),
            "classify",
            &HeatmonError::InvalidInput(f64::INFINITY),
        );
        log_summary(Source::Stations, "Load", 3, 2, 1);
    }
}
