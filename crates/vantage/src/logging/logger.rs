//! Context-scoped structured logger
//!
//! Builds a [`LogRecord`] per call — timestamp, context name, severity,
//! optional error payload, merged tags — and hands it to the dispatcher.
//! Severity filtering is the receiving sink's concern, not the logger's.

use chrono::Utc;

use crate::shared::{LogLevel, LogRecord, Record, Tag};
use crate::sinks::Dispatcher;

/// Structured logger bound to a context name and a base tag set
#[derive(Debug, Clone)]
pub struct Logger {
    context: String,
    sinks: Dispatcher,
    tags: Vec<Tag>,
}

impl Logger {
    /// Create a logger for `context`.
    pub fn new(context: impl Into<String>, sinks: Dispatcher) -> Self {
        Self::with_tags(context, sinks, Vec::new())
    }

    /// Create a logger carrying base tags merged into every entry.
    pub fn with_tags(context: impl Into<String>, sinks: Dispatcher, tags: Vec<Tag>) -> Self {
        Self { context: context.into(), sinks, tags }
    }

    /// Logger context name.
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Replace the context name.
    pub fn set_context(&mut self, context: impl Into<String>) {
        self.context = context.into();
    }

    /// Base tags merged into every entry.
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Replace the base tags.
    pub fn set_tags(&mut self, tags: Vec<Tag>) {
        self.tags = tags;
    }

    /// Log at an arbitrary level.
    pub fn log(&self, level: LogLevel, message: impl Into<String>, tags: &[Tag]) {
        self.emit(level, message.into(), None, tags);
    }

    /// Most detailed diagnostics.
    pub fn verbose(&self, message: impl Into<String>, tags: &[Tag]) {
        self.emit(LogLevel::Verbose, message.into(), None, tags);
    }

    /// Lower level diagnostics.
    pub fn debug(&self, message: impl Into<String>, tags: &[Tag]) {
        self.emit(LogLevel::Debug, message.into(), None, tags);
    }

    /// General logging.
    pub fn info(&self, message: impl Into<String>, tags: &[Tag]) {
        self.emit(LogLevel::Info, message.into(), None, tags);
    }

    /// Unusual although handled conditions.
    pub fn warn(&self, message: impl Into<String>, tags: &[Tag]) {
        self.emit(LogLevel::Warning, message.into(), None, tags);
    }

    /// Unhandled failures, with an optional error payload.
    pub fn error(
        &self,
        message: impl Into<String>,
        error: Option<&(dyn std::error::Error + 'static)>,
        tags: &[Tag],
    ) {
        self.emit(LogLevel::Error, message.into(), error.map(|error| error.to_string()), tags);
    }

    /// Application or process major failures, with an optional error payload.
    pub fn critical(
        &self,
        message: impl Into<String>,
        error: Option<&(dyn std::error::Error + 'static)>,
        tags: &[Tag],
    ) {
        self.emit(LogLevel::Critical, message.into(), error.map(|error| error.to_string()), tags);
    }

    fn emit(&self, level: LogLevel, message: String, error: Option<String>, tags: &[Tag]) {
        let merged: Vec<Tag> = self.tags.iter().cloned().chain(tags.iter().cloned()).collect();
        let record = LogRecord {
            timestamp: Utc::now(),
            name: self.context.clone(),
            level,
            message: Some(message),
            error,
            args: None,
            results: None,
            tags: merged,
        };
        self.sinks.dispatch(&Record::Log(record));
    }
}
