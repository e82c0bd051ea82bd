//! Normalized payloads delivered to sinks
//!
//! Every measure and logger output is reduced to a [`Record`] before
//! dispatch, so sinks handle exactly one shape regardless of the source.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::types::{LogLevel, MeasureKind, ProbeValue, Tag};

/// Point-in-time rates captured from a meter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateSnapshot {
    /// Total events observed
    pub count: u64,
    /// Events per second since the meter was created
    pub mean: f64,
    /// One-minute exponentially weighted rate
    pub one_min_rate: f64,
    /// Five-minute exponentially weighted rate
    pub five_min_rate: f64,
    /// Fifteen-minute exponentially weighted rate
    pub fifteen_min_rate: f64,
}

/// The value slot of a [`MeasureRecord`], selected consistently with the
/// record's [`MeasureKind`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RecordValue {
    /// Numeric reading (counter count, gauge number, timer elapsed ms)
    Scalar(f64),
    /// Boolean reading (gauge or health probe)
    Flag(bool),
    /// Meter rate snapshot
    Rates(RateSnapshot),
}

impl From<ProbeValue> for RecordValue {
    fn from(value: ProbeValue) -> Self {
        match value {
            ProbeValue::Number(number) => Self::Scalar(number),
            ProbeValue::Flag(flag) => Self::Flag(flag),
        }
    }
}

/// The value object emitted by any measure's write
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasureRecord {
    /// Measure name, set at construction
    pub name: String,
    /// Kind of the emitting measure
    pub kind: MeasureKind,
    /// Unit-of-measure label; timers emit none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uom: Option<String>,
    /// Measured value
    pub value: RecordValue,
    /// Captured at write time
    pub timestamp: DateTime<Utc>,
    /// Correlation id, empty when unset
    pub correlation_id: String,
    /// Ordered tag sequence
    pub tags: Vec<Tag>,
}

/// Structured log entry produced by a [`Logger`](crate::logging::Logger)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogRecord {
    /// Captured when the entry was created
    pub timestamp: DateTime<Utc>,
    /// Logger context the entry belongs to
    pub name: String,
    /// Entry severity
    pub level: LogLevel,
    /// Free-form message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Rendered error payload, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Arguments of an instrumented call, if captured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,
    /// Result of an instrumented call, if captured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<String>,
    /// Tags attached to the entry
    pub tags: Vec<Tag>,
}

/// The single payload shape sinks accept
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Record {
    /// Raw text sent through the facade
    Text(String),
    /// Structured log entry
    Log(LogRecord),
    /// Measure output
    Measure(MeasureRecord),
}

impl Record {
    /// The log level of a log record; other payloads carry none.
    pub fn level(&self) -> Option<LogLevel> {
        match self {
            Self::Log(log) => Some(log.level),
            _ => None,
        }
    }
}
