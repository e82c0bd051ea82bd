//! The measurement engine: measure state machines and their utilities
//!
//! Five measure kinds share one lifecycle: mutate local state, compose a
//! normalized record, hand it to the dispatcher. The utilities (rate
//! estimator, stopwatch, process sampling) carry the algorithmic weight.

pub mod counter;
pub mod ewma;
pub mod gauge;
pub mod health;
pub mod instrument;
pub mod meter;
pub mod process;
pub mod stopwatch;
pub mod timer;

// Re-export commonly used types for convenience
pub use counter::{Counter, MAX_COUNTER_VALUE};
pub use ewma::{Ewma, M15_ALPHA, M1_ALPHA, M5_ALPHA, TICK_INTERVAL};
pub use gauge::{Gauge, Probe};
pub use health::HealthCheck;
pub use instrument::Instrument;
pub use meter::Meter;
pub use process::{memory_snapshot, CpuTracker, MemorySnapshot};
pub use stopwatch::StopWatch;
pub use timer::Timer;
