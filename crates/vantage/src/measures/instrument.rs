//! Kind-keyed lifecycle dispatch for generic instrumentation
//!
//! Pre/post hooks that wrap an arbitrary call do not care which measure they
//! hold; they dispatch on the [`MeasureKind`] discriminant: counters
//! increment, meters mark, timers bracket the call with start/stop, and
//! probe-based measures simply write.

use crate::error::MeasureResult;
use crate::measures::{Counter, Gauge, HealthCheck, Meter, Timer};
use crate::shared::MeasureKind;

/// A measure of any kind, dispatched by its discriminant
pub enum Instrument {
    /// Counting measure
    Counter(Counter),
    /// Probe measure
    Gauge(Gauge),
    /// Health probe measure
    Health(HealthCheck),
    /// Rate measure
    Meter(Meter),
    /// Elapsed-time measure
    Timer(Timer),
}

impl Instrument {
    /// Kind discriminant of the wrapped measure.
    pub fn kind(&self) -> MeasureKind {
        match self {
            Self::Counter(_) => MeasureKind::Counter,
            Self::Gauge(_) => MeasureKind::Gauge,
            Self::Health(_) => MeasureKind::Health,
            Self::Meter(_) => MeasureKind::Meter,
            Self::Timer(_) => MeasureKind::Timer,
        }
    }

    /// Name of the wrapped measure.
    pub fn name(&self) -> &str {
        match self {
            Self::Counter(counter) => counter.name(),
            Self::Gauge(gauge) => gauge.name(),
            Self::Health(health) => health.name(),
            Self::Meter(meter) => meter.name(),
            Self::Timer(timer) => timer.name(),
        }
    }

    /// Pre-call lifecycle dispatch.
    ///
    /// # Errors
    ///
    /// Returns [`MeasureError::TimerAlreadyRunning`](crate::MeasureError)
    /// when entering a timer that is already measuring.
    pub fn enter(&mut self) -> MeasureResult<()> {
        match self {
            Self::Counter(counter) => counter.increment(),
            Self::Meter(meter) => meter.mark(1),
            Self::Timer(timer) => timer.start()?,
            Self::Gauge(gauge) => gauge.write(),
            Self::Health(health) => health.write(),
        }
        Ok(())
    }

    /// Post-call lifecycle dispatch: timers stop, every other kind already
    /// finished its work on entry.
    pub fn exit(&mut self) {
        if let Self::Timer(timer) = self {
            timer.stop();
        }
    }

    /// Run `operation` between `enter` and `exit`.
    pub fn observe<T>(&mut self, operation: impl FnOnce() -> T) -> MeasureResult<T> {
        self.enter()?;
        let result = operation();
        self.exit();
        Ok(result)
    }
}

impl From<Counter> for Instrument {
    fn from(counter: Counter) -> Self {
        Self::Counter(counter)
    }
}

impl From<Gauge> for Instrument {
    fn from(gauge: Gauge) -> Self {
        Self::Gauge(gauge)
    }
}

impl From<HealthCheck> for Instrument {
    fn from(health: HealthCheck) -> Self {
        Self::Health(health)
    }
}

impl From<Meter> for Instrument {
    fn from(meter: Meter) -> Self {
        Self::Meter(meter)
    }
}

impl From<Timer> for Instrument {
    fn from(timer: Timer) -> Self {
        Self::Timer(timer)
    }
}
