//! Host Logging Sink
//!
//! Forwards structured log events from the core to the host logging pipeline
//! (Logcat on Android, os_log on iOS, console on desktop).

use crate::time::{Clock, SystemClock};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

/// Structured log entry handed to the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    /// Unix timestamp in milliseconds.
    pub timestamp_ms: i64,
    /// Target module/component.
    pub target: String,
    pub message: String,
    /// Structured fields emitted on the event.
    pub fields: HashMap<String, String>,
}

impl LogEntry {
    pub fn new(level: LogLevel, target: impl Into<String>, message: impl Into<String>) -> Self {
        Self::at(&SystemClock, level, target, message)
    }

    /// Build an entry stamped from the given clock.
    pub fn at(
        clock: &dyn Clock,
        level: LogLevel,
        target: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            level,
            timestamp_ms: clock.unix_timestamp_millis(),
            target: target.into(),
            message: message.into(),
            fields: HashMap::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }
}

/// Logger sink trait.
///
/// Called synchronously from the tracing layer, so implementations must be
/// cheap; buffer and hand off if the host logger blocks. Entries below
/// `min_level` are filtered out before the sink is invoked.
pub trait LoggerSink: Send + Sync {
    /// Forward a log entry to the host logging system.
    fn log(&self, entry: LogEntry);

    /// Minimum level the sink wants to receive.
    fn min_level(&self) -> LogLevel {
        LogLevel::Info
    }
}

/// Console logger for development and tests.
#[derive(Debug, Clone)]
pub struct ConsoleLogger {
    pub min_level: LogLevel,
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
        }
    }
}

impl LoggerSink for ConsoleLogger {
    fn log(&self, entry: LogEntry) {
        if entry.level >= self.min_level {
            println!(
                "[{}] {} {}: {}",
                entry.timestamp_ms,
                entry.level.as_str(),
                entry.target,
                entry.message
            );
            if !entry.fields.is_empty() {
                println!("  fields: {:?}", entry.fields);
            }
        }
    }

    fn min_level(&self) -> LogLevel {
        self.min_level
    }
}
