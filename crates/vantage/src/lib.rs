//! Vantage — an application-performance-monitoring toolkit.
//!
//! Measures (counter, gauge, health check, meter, timer) emit normalized
//! records through a [`Dispatcher`](sinks::Dispatcher) to pluggable sinks;
//! a structured [`Logger`](logging::Logger) shares the same delivery path,
//! and the [`Apm`](apm::Apm) facade wires defaults together.
//!
//! # Quick start
//!
//! ```
//! use vantage::shared::MeasureOptions;
//! use vantage::{default_console_apm, MeasureResult};
//!
//! fn main() -> MeasureResult<()> {
//!     let apm = default_console_apm();
//!
//!     let mut requests = apm.count_operation("requests", None, MeasureOptions::default())?;
//!     requests.increment();
//!
//!     let mut span = apm.time_operation("handler", None, MeasureOptions::default())?;
//!     span.start()?;
//!     // ... the work being measured ...
//!     span.stop();
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod apm;
pub mod error;
pub mod logging;
pub mod measures;
pub mod shared;
pub mod sinks;
pub mod testing;
pub mod time;

// Re-export commonly used types and functions for convenience
pub use apm::{default_apm, default_console_apm, default_datadog_apm, Apm};
pub use error::{MeasureError, MeasureResult};
pub use logging::Logger;
pub use measures::{
    Counter, Ewma, Gauge, HealthCheck, Instrument, Meter, StopWatch, Timer, MAX_COUNTER_VALUE,
};
pub use shared::{
    LogLevel, LogRecord, MeasureKind, MeasureOptions, MeasureRecord, ProbeValue, RateSnapshot,
    Record, RecordValue, Tag, TagValue,
};
pub use sinks::{ConsoleSink, Dispatcher, Sink};
