//! Exponentially weighted moving average rate estimator
//!
//! Reproduces the classic 1/5/15-minute load-average smoothing: a fixed
//! five-second tick folds the interval's accumulated count into the smoothed
//! rate using a per-window decay constant.

use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::Lazy;
use parking_lot::Mutex;

use crate::time::{recurring, TickerHandle};

/// Decay constant for the one-minute window.
pub static M1_ALPHA: Lazy<f64> = Lazy::new(|| 1.0 - (-5.0_f64 / 60.0).exp());

/// Decay constant for the five-minute window.
pub static M5_ALPHA: Lazy<f64> = Lazy::new(|| 1.0 - (-5.0_f64 / 60.0 / 5.0).exp());

/// Decay constant for the fifteen-minute window.
pub static M15_ALPHA: Lazy<f64> = Lazy::new(|| 1.0 - (-5.0_f64 / 60.0 / 15.0).exp());

/// Interval the decay constants are paired with.
pub const TICK_INTERVAL: Duration = Duration::from_millis(5000);

#[derive(Debug, Default)]
struct EwmaState {
    uncounted: f64,
    current_rate: f64,
    initialized: bool,
}

/// Exponentially weighted moving average rate tracker
///
/// Updates accumulate into the current interval; each tick converts the
/// accumulation into an instantaneous rate and blends it into the smoothed
/// value. The tick runs on a background task when a tokio runtime is current
/// at construction and the interval is nonzero; otherwise [`Ewma::tick`] must
/// be driven manually.
pub struct Ewma {
    alpha: f64,
    interval: Duration,
    state: Arc<Mutex<EwmaState>>,
    ticker: Option<TickerHandle>,
}

impl Ewma {
    /// Create an estimator with the given decay constant and tick interval.
    ///
    /// A zero `interval` never starts the background tick; in that
    /// configuration the rate stays unsmoothed until ticked manually.
    pub fn new(alpha: f64, interval: Duration) -> Self {
        let state = Arc::new(Mutex::new(EwmaState::default()));
        let interval_ms = interval.as_secs_f64() * 1000.0;
        let tick_state = Arc::clone(&state);
        let ticker = recurring(interval, move || Self::advance(&tick_state, alpha, interval_ms));
        Self { alpha, interval, state, ticker }
    }

    /// One-minute estimator on the standard five-second tick.
    pub fn one_minute() -> Self {
        Self::new(*M1_ALPHA, TICK_INTERVAL)
    }

    /// Five-minute estimator on the standard five-second tick.
    pub fn five_minute() -> Self {
        Self::new(*M5_ALPHA, TICK_INTERVAL)
    }

    /// Fifteen-minute estimator on the standard five-second tick.
    pub fn fifteen_minute() -> Self {
        Self::new(*M15_ALPHA, TICK_INTERVAL)
    }

    /// Add `n` events to the current interval. Never fails, O(1).
    pub fn update(&self, n: f64) {
        self.state.lock().uncounted += n;
    }

    /// Fold the accumulated count into the smoothed rate.
    ///
    /// Invoked by the background task at each interval boundary; call
    /// directly only when the estimator runs unscheduled.
    pub fn tick(&self) {
        Self::advance(&self.state, self.alpha, self.interval.as_secs_f64() * 1000.0);
    }

    fn advance(state: &Mutex<EwmaState>, alpha: f64, interval_ms: f64) {
        if interval_ms <= 0.0 {
            return;
        }
        let mut state = state.lock();
        let instant_rate = state.uncounted / interval_ms;
        state.uncounted = 0.0;
        if state.initialized {
            state.current_rate += alpha * (instant_rate - state.current_rate);
        } else {
            state.current_rate = instant_rate;
            state.initialized = true;
        }
    }

    /// Current smoothed rate in events per second; 0 before the first tick.
    pub fn rate(&self) -> f64 {
        self.state.lock().current_rate * 1000.0
    }

    /// Stop collecting: cancels the background tick and freezes the rate.
    pub fn stop(&self) {
        if let Some(ticker) = &self.ticker {
            tracing::trace!("stopping ewma tick");
            ticker.cancel();
        }
    }
}

impl Drop for Ewma {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for measures::ewma.
    use super::*;

    /// Validates `Ewma::rate` behavior for the pre-tick scenario.
    ///
    /// Assertions:
    /// - Confirms `ewma.rate()` equals `0.0` before any tick.
    #[test]
    fn test_rate_zero_before_first_tick() {
        let ewma = Ewma::new(*M1_ALPHA, Duration::from_millis(5000));
        ewma.update(100.0);
        assert_eq!(ewma.rate(), 0.0);
    }

    /// Validates `Ewma::tick` behavior for the first-tick scenario.
    ///
    /// The first tick bypasses the EWMA blend and adopts the instantaneous
    /// rate directly.
    ///
    /// Assertions:
    /// - Confirms `ewma.rate()` equals `(10.0 / 5000.0) * 1000.0`.
    #[test]
    fn test_first_tick_adopts_instant_rate() {
        let ewma = Ewma::new(*M1_ALPHA, Duration::from_millis(5000));
        ewma.update(10.0);
        ewma.tick();
        assert_eq!(ewma.rate(), (10.0 / 5000.0) * 1000.0);
    }

    /// Validates `Ewma::tick` behavior for the smoothing scenario.
    ///
    /// Assertions:
    /// - Confirms the second tick blends toward the new instantaneous rate.
    #[test]
    fn test_second_tick_blends() {
        let alpha = *M1_ALPHA;
        let ewma = Ewma::new(alpha, Duration::from_millis(5000));
        ewma.update(10.0);
        ewma.tick();
        let first = ewma.rate();

        ewma.update(20.0);
        ewma.tick();
        let expected = first + alpha * ((20.0 / 5000.0) * 1000.0 - first);
        assert!((ewma.rate() - expected).abs() < 1e-9);
    }

    /// Validates `Ewma::tick` behavior for the interval-reset scenario.
    ///
    /// Assertions:
    /// - Confirms an empty interval decays the rate toward zero.
    #[test]
    fn test_tick_resets_uncounted() {
        let ewma = Ewma::new(*M1_ALPHA, Duration::from_millis(5000));
        ewma.update(10.0);
        ewma.tick();
        let first = ewma.rate();

        ewma.tick();
        assert!(ewma.rate() < first);
    }

    /// Validates `Ewma::new` behavior for the zero-interval guard scenario.
    ///
    /// Assertions:
    /// - Confirms `ewma.rate()` equals `0.0` even after updates and ticks.
    #[test]
    fn test_zero_interval_never_divides() {
        let ewma = Ewma::new(*M1_ALPHA, Duration::ZERO);
        ewma.update(10.0);
        ewma.tick();
        assert_eq!(ewma.rate(), 0.0);
    }

    /// Validates the decay constants against their closed forms.
    ///
    /// Assertions:
    /// - Confirms `*M1_ALPHA` equals `1 - e^(-5/60)`.
    /// - Ensures `*M15_ALPHA < *M5_ALPHA && *M5_ALPHA < *M1_ALPHA` evaluates
    ///   to true.
    #[test]
    fn test_decay_constants() {
        assert!((*M1_ALPHA - (1.0 - (-5.0_f64 / 60.0).exp())).abs() < 1e-12);
        assert!(*M15_ALPHA < *M5_ALPHA && *M5_ALPHA < *M1_ALPHA);
    }

    /// Validates `Ewma::stop` behavior for the frozen-rate scenario.
    ///
    /// Assertions:
    /// - Confirms `ewma.rate()` is unchanged after `stop` and further
    ///   scheduled time.
    #[tokio::test(start_paused = true)]
    async fn test_scheduled_tick_and_stop() {
        let ewma = Ewma::new(*M1_ALPHA, Duration::from_millis(5000));
        ewma.update(25.0);

        tokio::time::sleep(Duration::from_millis(5100)).await;
        tokio::task::yield_now().await;

        let rate = ewma.rate();
        assert!(rate > 0.0);

        ewma.stop();
        ewma.update(500.0);
        tokio::time::sleep(Duration::from_millis(11_000)).await;
        tokio::task::yield_now().await;
        assert_eq!(ewma.rate(), rate);
    }
}
