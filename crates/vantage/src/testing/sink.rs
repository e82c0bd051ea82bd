//! Accumulating mock sink

use parking_lot::Mutex;

use crate::shared::{LogLevel, MeasureRecord, Record};
use crate::sinks::Sink;

/// Sink that captures every record for later assertions
///
/// Accepts all levels; counting and capture are the test's filtering
/// primitives.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use vantage::sinks::{Dispatcher, Sink};
/// use vantage::testing::RecordingSink;
/// use vantage::Counter;
///
/// let sink = Arc::new(RecordingSink::new());
/// let dispatcher = Dispatcher::fan_out(vec![Arc::clone(&sink) as Arc<dyn Sink>]);
///
/// let mut counter = Counter::new("clicks", dispatcher).unwrap();
/// counter.increment();
/// assert_eq!(sink.message_count(), 1);
/// ```
#[derive(Debug)]
pub struct RecordingSink {
    level: LogLevel,
    records: Mutex<Vec<Record>>,
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingSink {
    /// Create a sink accepting every level.
    pub fn new() -> Self {
        Self { level: LogLevel::Verbose, records: Mutex::new(Vec::new()) }
    }

    /// Create a sink advertising a specific level threshold.
    pub fn with_level(level: LogLevel) -> Self {
        Self { level, records: Mutex::new(Vec::new()) }
    }

    /// Number of records received.
    pub fn message_count(&self) -> usize {
        self.records.lock().len()
    }

    /// Copy of every captured record, in arrival order.
    pub fn records(&self) -> Vec<Record> {
        self.records.lock().clone()
    }

    /// The most recently captured record.
    pub fn last(&self) -> Option<Record> {
        self.records.lock().last().cloned()
    }

    /// Captured measure records only, in arrival order.
    pub fn measures(&self) -> Vec<MeasureRecord> {
        self.records
            .lock()
            .iter()
            .filter_map(|record| match record {
                Record::Measure(measure) => Some(measure.clone()),
                _ => None,
            })
            .collect()
    }

    /// Discard everything captured so far.
    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl Sink for RecordingSink {
    fn log_level(&self) -> LogLevel {
        self.level
    }

    fn send(&self, record: &Record) {
        self.records.lock().push(record.clone());
    }
}
