//! Console sink
//!
//! Prints each accepted record to stdout, either through a supplied formatter
//! or as a JSON line. Log records below the configured level are dropped;
//! text and measure records always pass.

use crate::shared::{LogLevel, Record};
use crate::sinks::dispatch::Sink;

type Formatter = Box<dyn Fn(&Record) -> String + Send + Sync>;

/// Stdout sink with a severity threshold and optional line formatter
pub struct ConsoleSink {
    level: LogLevel,
    formatter: Option<Formatter>,
}

impl ConsoleSink {
    /// Create a console sink emitting JSON lines.
    pub fn new(level: LogLevel) -> Self {
        Self { level, formatter: None }
    }

    /// Create a console sink with a custom line formatter.
    pub fn with_formatter(
        level: LogLevel,
        formatter: impl Fn(&Record) -> String + Send + Sync + 'static,
    ) -> Self {
        Self { level, formatter: Some(Box::new(formatter)) }
    }

    fn should_sink(&self, record: &Record) -> bool {
        match record.level() {
            Some(level) => level >= self.level,
            None => true,
        }
    }
}

impl Sink for ConsoleSink {
    fn log_level(&self) -> LogLevel {
        self.level
    }

    fn send(&self, record: &Record) {
        if !self.should_sink(record) {
            return;
        }
        match &self.formatter {
            Some(formatter) => println!("{}", formatter(record)),
            None => match serde_json::to_string(record) {
                Ok(line) => println!("{line}"),
                Err(error) => tracing::warn!(%error, "failed to serialize record"),
            },
        }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new(LogLevel::Info)
    }
}
