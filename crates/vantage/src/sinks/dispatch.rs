//! Record delivery to one-or-many sinks or a single callback
//!
//! Measures never branch on the target shape: construction selects a fan-out
//! or callback dispatcher once, and every write goes through the single
//! `dispatch` method.

use std::fmt;
use std::sync::Arc;

use crate::shared::{LogLevel, Record};

/// Destination for normalized records
///
/// `send` returns nothing; delivery is fire-and-forget and a panicking sink
/// propagates to the writer. The advertised `log_level` is consumed only by
/// log-record consumers; measure records are never filtered by level.
pub trait Sink: Send + Sync {
    /// Lowest log level this sink accepts for log records.
    fn log_level(&self) -> LogLevel {
        LogLevel::Verbose
    }

    /// Accept a record.
    fn send(&self, record: &Record);
}

enum Target {
    FanOut(Vec<Arc<dyn Sink>>),
    Callback(Box<dyn Fn(&Record) + Send + Sync>),
}

/// Uniform delivery path shared by every measure and logger
///
/// Cheaply cloneable; clones share the same target.
#[derive(Clone)]
pub struct Dispatcher {
    target: Arc<Target>,
}

impl Dispatcher {
    /// Dispatch to every sink in order, synchronously.
    pub fn fan_out(sinks: Vec<Arc<dyn Sink>>) -> Self {
        Self { target: Arc::new(Target::FanOut(sinks)) }
    }

    /// Dispatch to a single sink.
    pub fn sink(sink: impl Sink + 'static) -> Self {
        Self::fan_out(vec![Arc::new(sink)])
    }

    /// Dispatch to a single callback.
    pub fn callback(callback: impl Fn(&Record) + Send + Sync + 'static) -> Self {
        Self { target: Arc::new(Target::Callback(Box::new(callback))) }
    }

    /// Whether this is a fan-out over zero sinks.
    ///
    /// The facade treats an empty override as "use the default target".
    pub fn is_empty(&self) -> bool {
        matches!(self.target.as_ref(), Target::FanOut(sinks) if sinks.is_empty())
    }

    /// Number of sinks behind this dispatcher; a callback counts as one.
    pub fn len(&self) -> usize {
        match self.target.as_ref() {
            Target::FanOut(sinks) => sinks.len(),
            Target::Callback(_) => 1,
        }
    }

    /// Deliver `record` to the configured target.
    ///
    /// Fan-out is in order with no isolation between sinks: a panicking sink
    /// aborts delivery to the remaining ones and propagates to the caller.
    pub fn dispatch(&self, record: &Record) {
        match self.target.as_ref() {
            Target::FanOut(sinks) => {
                for sink in sinks {
                    sink.send(record);
                }
            }
            Target::Callback(callback) => callback(record),
        }
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.target.as_ref() {
            Target::FanOut(sinks) => {
                f.debug_struct("Dispatcher").field("fan_out", &sinks.len()).finish()
            }
            Target::Callback(_) => {
                f.debug_struct("Dispatcher").field("callback", &"..").finish()
            }
        }
    }
}
