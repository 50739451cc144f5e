//! Structured logging for the Gemini chat client.
//!
//! Services log through the [`Logger`] trait so tests and embedders can swap
//! the sink; [`StructuredLogger`] forwards to `tracing`.

use serde_json::Value;

use crate::config::LogLevel;

const REDACTED: &str = "***REDACTED***";

/// Field names whose values never reach a log sink.
const SENSITIVE_KEYS: &[&str] = &[
    "api_key",
    "apikey",
    "key",
    "token",
    "access_token",
    "accesstoken",
    "secret",
    "password",
    "credential",
    "authorization",
    "auth",
];

/// Logger trait for structured logging.
pub trait Logger: Send + Sync {
    /// Log a debug message with structured context.
    fn debug(&self, message: &str, fields: Value);

    /// Log an info message with structured context.
    fn info(&self, message: &str, fields: Value);

    /// Log a warning message with structured context.
    fn warn(&self, message: &str, fields: Value);

    /// Log an error message with structured context.
    fn error(&self, message: &str, fields: Value);
}

/// Logger that emits `tracing` events with redacted JSON fields.
///
/// ```
/// use integrations_gemini_chat::observability::{Logger, StructuredLogger};
/// use integrations_gemini_chat::config::LogLevel;
/// use serde_json::json;
///
/// let logger = StructuredLogger::new("gemini.generation").with_level(LogLevel::Debug);
/// logger.info("generateContent started", json!({ "model": "gemini-2.0-flash" }));
/// ```
#[derive(Debug, Clone)]
pub struct StructuredLogger {
    name: String,
    level: LogLevel,
}

impl StructuredLogger {
    /// Creates a logger at `Info` level.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            level: LogLevel::Info,
        }
    }

    /// Sets the most verbose level this logger emits.
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Name attached to every event.
    pub fn name(&self) -> &str {
        &self.name
    }

    fn should_log(&self, level: LogLevel) -> bool {
        level <= self.level
    }
}

/// Replaces sensitive values at any depth, including inside arrays.
pub(crate) fn redact_sensitive_fields(fields: Value) -> Value {
    match fields {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| {
                    if SENSITIVE_KEYS.contains(&key.to_ascii_lowercase().as_str()) {
                        (key, Value::String(REDACTED.to_string()))
                    } else {
                        (key, redact_sensitive_fields(value))
                    }
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(redact_sensitive_fields).collect()),
        other => other,
    }
}

impl Logger for StructuredLogger {
    fn debug(&self, message: &str, fields: Value) {
        if !self.should_log(LogLevel::Debug) {
            return;
        }
        let fields = redact_sensitive_fields(fields);
        tracing::debug!(logger = %self.name, fields = %fields, "{}", message);
    }

    fn info(&self, message: &str, fields: Value) {
        if !self.should_log(LogLevel::Info) {
            return;
        }
        let fields = redact_sensitive_fields(fields);
        tracing::info!(logger = %self.name, fields = %fields, "{}", message);
    }

    fn warn(&self, message: &str, fields: Value) {
        if !self.should_log(LogLevel::Warn) {
            return;
        }
        let fields = redact_sensitive_fields(fields);
        tracing::warn!(logger = %self.name, fields = %fields, "{}", message);
    }

    fn error(&self, message: &str, fields: Value) {
        if !self.should_log(LogLevel::Error) {
            return;
        }
        let fields = redact_sensitive_fields(fields);
        tracing::error!(logger = %self.name, fields = %fields, "{}", message);
    }
}

/// Logger that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultLogger;

impl DefaultLogger {
    /// Creates a silent logger.
    pub fn new() -> Self {
        Self
    }
}

impl Logger for DefaultLogger {
    fn debug(&self, _message: &str, _fields: Value) {}
    fn info(&self, _message: &str, _fields: Value) {}
    fn warn(&self, _message: &str, _fields: Value) {}
    fn error(&self, _message: &str, _fields: Value) {}
}
