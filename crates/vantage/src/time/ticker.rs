//! Cancellable recurring tick scheduler
//!
//! Drives periodic work (the EWMA tick) on a fixed interval without blocking
//! the caller or process shutdown.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Handle used to cancel a recurring ticker
#[derive(Debug, Clone)]
pub struct TickerHandle {
    cancelled: Arc<AtomicBool>,
}

impl TickerHandle {
    fn new() -> Self {
        Self { cancelled: Arc::new(AtomicBool::new(false)) }
    }

    /// Cancel the ticker; no further callbacks fire after the current tick.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Check if the ticker has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Schedules `callback` to run every `interval` on the current tokio runtime.
///
/// Returns `None` without scheduling when `interval` is zero or when no
/// runtime is current; callers degrade to driving their tick manually. The
/// spawned task holds no runtime-blocking resources, so it never delays
/// shutdown.
pub fn recurring<F>(interval: Duration, mut callback: F) -> Option<TickerHandle>
where
    F: FnMut() + Send + 'static,
{
    if interval.is_zero() {
        return None;
    }
    let Ok(runtime) = tokio::runtime::Handle::try_current() else {
        tracing::debug!(interval_ms = interval.as_millis() as u64, "no tokio runtime; tick not scheduled");
        return None;
    };

    let handle = TickerHandle::new();
    let handle_clone = handle.clone();

    runtime.spawn(async move {
        let mut ticks = tokio::time::interval(interval);
        ticks.tick().await; // Skip first immediate tick

        while !handle_clone.is_cancelled() {
            ticks.tick().await;
            if !handle_clone.is_cancelled() {
                callback();
            }
        }
    });

    Some(handle)
}

#[cfg(test)]
mod tests {
    //! Unit tests for time::ticker.
    use std::sync::atomic::AtomicU32;

    use super::*;

    /// Validates `TickerHandle` behavior for the cancel scenario.
    ///
    /// Assertions:
    /// - Ensures `!handle.is_cancelled()` evaluates to true.
    /// - Ensures `handle.is_cancelled()` evaluates to true.
    #[tokio::test]
    async fn test_ticker_handle_cancel() {
        let handle = recurring(Duration::from_millis(10), || {}).expect("ticker");
        assert!(!handle.is_cancelled());

        handle.cancel();
        assert!(handle.is_cancelled());
    }

    /// Validates `recurring` behavior for the periodic callback scenario.
    ///
    /// Assertions:
    /// - Ensures `(2..=4).contains(&count)` evaluates to true.
    #[tokio::test]
    async fn test_recurring_fires() {
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let handle = recurring(Duration::from_millis(10), move || {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        })
        .expect("ticker");

        tokio::time::sleep(Duration::from_millis(35)).await;
        handle.cancel();
        tokio::time::sleep(Duration::from_millis(20)).await;

        // Fired at roughly 10ms, 20ms, 30ms; allow timing variance
        let count = counter.load(Ordering::SeqCst);
        assert!((2..=4).contains(&count));
    }

    /// Validates `recurring` behavior for the zero-interval guard scenario.
    ///
    /// Assertions:
    /// - Ensures `recurring(Duration::ZERO, ..).is_none()` evaluates to true.
    #[tokio::test]
    async fn test_zero_interval_not_scheduled() {
        assert!(recurring(Duration::ZERO, || {}).is_none());
    }

    /// Validates `recurring` behavior for the no-runtime guard scenario.
    ///
    /// Assertions:
    /// - Ensures `recurring(..).is_none()` evaluates to true outside a
    ///   runtime.
    #[test]
    fn test_no_runtime_not_scheduled() {
        assert!(recurring(Duration::from_millis(10), || {}).is_none());
    }
}
