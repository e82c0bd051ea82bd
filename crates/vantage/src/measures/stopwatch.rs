//! Single-use elapsed-time capture
//!
//! A stopwatch is already running when constructed. The first `end` call is
//! the one completion notification its owner receives; every later call is a
//! no-op.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::time::{Clock, SystemClock};

/// One-shot elapsed-time capture against a monotonic clock
pub struct StopWatch {
    clock: Arc<dyn Clock>,
    start: Instant,
    ended: bool,
}

impl StopWatch {
    /// Create a stopwatch running on the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create a stopwatch running on the supplied clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        let start = clock.now();
        Self { clock, start, ended: false }
    }

    /// Elapsed time since construction, without ending the watch.
    pub fn elapsed(&self) -> Duration {
        self.clock.now().duration_since(self.start)
    }

    /// End the watch.
    ///
    /// The first call measures and returns `Some(elapsed)` — the single
    /// completion notification. Subsequent calls return `None` and measure
    /// nothing.
    pub fn end(&mut self) -> Option<Duration> {
        if self.ended {
            return None;
        }
        self.ended = true;
        Some(self.elapsed())
    }

    /// Whether `end` has already fired.
    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

impl Default for StopWatch {
    fn default() -> Self {
        Self::new()
    }
}
