//! Logger capability for lambda-app invocations.
//!
//! Every invocation carries an [`AppLogger`]: a four-method sink
//! (`info`, `warn`, `error`, `debug`). Applications inject their own
//! implementation; when none is injected, [`JsonLogger`] is used.
//!
//! # Usage
//!
//! ```rust
//! use lambda_app_log::{AppLogger, JsonLogger, Level};
//!
//! let log = JsonLogger::new().with_level(Level::Debug);
//! log.info("Server started");
//! log.debug("Matching route");
//! ```
//!
//! # Output
//!
//! [`JsonLogger`] writes one JSON object per line:
//!
//! ```text
//! {"level":"info","message":"Server started"}
//! ```
//!
//! `info`/`debug` go to stdout, `warn`/`error` go to stderr.
//!
//! # Environment Variables
//!
//! - `LAMBDA_APP_LOG_LEVEL=debug|info|warn|error|off` - minimum level for [`JsonLogger::from_env`]

use once_cell::sync::Lazy;
use serde::Serialize;
use std::env;
use std::sync::Arc;

// ============================================================================
// Log Levels
// ============================================================================

/// Severity of a log message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Level {
    /// Debug level (most verbose)
    Debug = 1,
    /// Info level
    Info = 2,
    /// Warning level
    Warn = 3,
    /// Error level (least verbose)
    Error = 4,
    /// Off (no logging)
    Off = 5,
}

impl Level {
    /// Parse a level name, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "debug" => Some(Level::Debug),
            "info" => Some(Level::Info),
            "warn" | "warning" => Some(Level::Warn),
            "error" => Some(Level::Error),
            "off" | "none" => Some(Level::Off),
            _ => None,
        }
    }

    /// Lower-case level name, as written in the `level` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Off => "off",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Capability
// ============================================================================

/// Four-method logging sink used by an invocation.
pub trait AppLogger: Send + Sync {
    /// Log an informational message.
    fn info(&self, message: &str);

    /// Log a warning.
    fn warn(&self, message: &str);

    /// Log an error.
    fn error(&self, message: &str);

    /// Log a debug message.
    fn debug(&self, message: &str);

    /// Log at the given level.
    fn log(&self, level: Level, message: &str) {
        match level {
            Level::Debug => self.debug(message),
            Level::Info => self.info(message),
            Level::Warn => self.warn(message),
            Level::Error => self.error(message),
            Level::Off => {}
        }
    }
}

impl<T: AppLogger + ?Sized> AppLogger for Arc<T> {
    fn info(&self, message: &str) {
        (**self).info(message)
    }

    fn warn(&self, message: &str) {
        (**self).warn(message)
    }

    fn error(&self, message: &str) {
        (**self).error(message)
    }

    fn debug(&self, message: &str) {
        (**self).debug(message)
    }
}

/// Shared default logger handed out when nothing was injected.
static DEFAULT_LOGGER: Lazy<Arc<dyn AppLogger>> = Lazy::new(|| Arc::new(JsonLogger::from_env()));

/// The process-wide fallback logger.
pub fn default_logger() -> Arc<dyn AppLogger> {
    DEFAULT_LOGGER.clone()
}

// ============================================================================
// JSON Logger
// ============================================================================

#[derive(Serialize)]
struct LogEntry<'a> {
    level: &'a str,
    message: &'a str,
}

/// Render a log line as `{"level":"<level>","message":"<message>"}`.
pub fn format_entry(level: Level, message: &str) -> String {
    let entry = LogEntry {
        level: level.as_str(),
        message,
    };
    serde_json::to_string(&entry).unwrap_or_default()
}

/// Default logger: one JSON object per line on stdout/stderr.
#[derive(Debug, Clone, Copy)]
pub struct JsonLogger {
    level: Level,
}

impl JsonLogger {
    /// Create a logger that emits `Debug` and above.
    pub fn new() -> Self {
        Self {
            level: Level::Debug,
        }
    }

    /// Create a logger whose minimum level comes from `LAMBDA_APP_LOG_LEVEL`.
    pub fn from_env() -> Self {
        let level = env::var("LAMBDA_APP_LOG_LEVEL")
            .ok()
            .and_then(|s| Level::parse(&s))
            .unwrap_or(Level::Debug);
        Self { level }
    }

    /// Set the minimum level.
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Minimum level.
    pub fn level(&self) -> Level {
        self.level
    }

    /// Check if a level passes the filter.
    pub fn is_enabled(&self, level: Level) -> bool {
        level != Level::Off && level >= self.level
    }

    fn emit(&self, level: Level, message: &str) {
        if !self.is_enabled(level) {
            return;
        }
        let line = format_entry(level, message);
        match level {
            Level::Warn | Level::Error => eprintln!("{}", line),
            _ => println!("{}", line),
        }
    }
}

impl Default for JsonLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl AppLogger for JsonLogger {
    fn info(&self, message: &str) {
        self.emit(Level::Info, message);
    }

    fn warn(&self, message: &str) {
        self.emit(Level::Warn, message);
    }

    fn error(&self, message: &str) {
        self.emit(Level::Error, message);
    }

    fn debug(&self, message: &str) {
        self.emit(Level::Debug, message);
    }
}

// ============================================================================
// Tracing Integration
// ============================================================================

#[cfg(feature = "tracing")]
mod tracing_logger {
    use super::AppLogger;

    /// Logger that forwards to the `tracing` macros under target `lambda_app`.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct TracingLogger;

    impl TracingLogger {
        /// Create a tracing-backed logger.
        pub fn new() -> Self {
            Self
        }
    }

    impl AppLogger for TracingLogger {
        fn info(&self, message: &str) {
            tracing::info!(target: "lambda_app", "{}", message);
        }

        fn warn(&self, message: &str) {
            tracing::warn!(target: "lambda_app", "{}", message);
        }

        fn error(&self, message: &str) {
            tracing::error!(target: "lambda_app", "{}", message);
        }

        fn debug(&self, message: &str) {
            tracing::debug!(target: "lambda_app", "{}", message);
        }
    }
}

#[cfg(feature = "tracing")]
pub use tracing_logger::TracingLogger;

// ============================================================================
// Tests
// ============================================================================
