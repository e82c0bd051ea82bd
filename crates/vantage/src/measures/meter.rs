//! Meter measure
//!
//! Tracks a monotonically non-decreasing event count alongside 1/5/15-minute
//! exponentially weighted rates and an events-per-second mean since
//! construction.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;

use crate::error::{MeasureError, MeasureResult};
use crate::measures::ewma::Ewma;
use crate::shared::{
    MeasureKind, MeasureOptions, MeasureRecord, RateSnapshot, Record, RecordValue, Tag,
};
use crate::sinks::Dispatcher;
use crate::time::{Clock, SystemClock};

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Rate-of-events measure
pub struct Meter {
    name: String,
    uom: String,
    correlation_id: String,
    tags: Vec<Tag>,
    sinks: Dispatcher,
    count: u64,
    started: Instant,
    clock: Arc<dyn Clock>,
    m1_rate: Ewma,
    m5_rate: Ewma,
    m15_rate: Ewma,
}

impl std::fmt::Debug for Meter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Meter")
            .field("name", &self.name)
            .field("uom", &self.uom)
            .field("correlation_id", &self.correlation_id)
            .field("tags", &self.tags)
            .field("count", &self.count)
            .finish_non_exhaustive()
    }
}

impl Meter {
    /// Create a meter with default options.
    pub fn new(name: impl Into<String>, sinks: Dispatcher) -> MeasureResult<Self> {
        Self::with_options(name, sinks, MeasureOptions::default())
    }

    /// Create a meter with explicit options.
    ///
    /// # Errors
    ///
    /// Returns [`MeasureError::MissingName`] when `name` is empty.
    pub fn with_options(
        name: impl Into<String>,
        sinks: Dispatcher,
        options: MeasureOptions,
    ) -> MeasureResult<Self> {
        Self::with_clock(name, sinks, options, Arc::new(SystemClock))
    }

    /// Create a meter reading elapsed time from the supplied clock.
    pub fn with_clock(
        name: impl Into<String>,
        sinks: Dispatcher,
        options: MeasureOptions,
        clock: Arc<dyn Clock>,
    ) -> MeasureResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(MeasureError::MissingName);
        }
        let started = clock.now();
        Ok(Self {
            name,
            uom: options.uom,
            correlation_id: options.correlation_id,
            tags: options.tags,
            sinks,
            count: 0,
            started,
            clock,
            m1_rate: Ewma::one_minute(),
            m5_rate: Ewma::five_minute(),
            m15_rate: Ewma::fifteen_minute(),
        })
    }

    /// Measure name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Kind discriminant.
    pub fn kind(&self) -> MeasureKind {
        MeasureKind::Meter
    }

    /// Total events observed.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Unit of measure.
    pub fn uom(&self) -> &str {
        &self.uom
    }

    /// Correlation id.
    pub fn correlation_id(&self) -> &str {
        &self.correlation_id
    }

    /// Tags attached to every record.
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Record `n` events. O(1): bumps the count and feeds every estimator.
    pub fn mark(&mut self, n: u64) {
        self.count += n;
        let value = n as f64;
        self.m1_rate.update(value);
        self.m5_rate.update(value);
        self.m15_rate.update(value);
    }

    /// Events per second since construction.
    ///
    /// The denominator is wall-clock time since the meter was created, not
    /// since the first mark; a long-idle meter drifts toward zero even with
    /// no new events.
    pub fn mean_rate(&self) -> f64 {
        let elapsed_ms =
            self.clock.now().duration_since(self.started).as_secs_f64() * 1000.0;
        if elapsed_ms == 0.0 {
            return 0.0;
        }
        self.count as f64 / elapsed_ms * 1000.0
    }

    /// One-minute exponentially weighted rate.
    pub fn one_minute_rate(&self) -> f64 {
        self.m1_rate.rate()
    }

    /// Five-minute exponentially weighted rate.
    pub fn five_minute_rate(&self) -> f64 {
        self.m5_rate.rate()
    }

    /// Fifteen-minute exponentially weighted rate.
    pub fn fifteen_minute_rate(&self) -> f64 {
        self.m15_rate.rate()
    }

    /// Snapshot of all rates, unrounded.
    pub fn rates(&self) -> RateSnapshot {
        RateSnapshot {
            count: self.count,
            mean: self.mean_rate(),
            one_min_rate: self.one_minute_rate(),
            five_min_rate: self.five_minute_rate(),
            fifteen_min_rate: self.fifteen_minute_rate(),
        }
    }

    /// Emit the current rate snapshot, each rate rounded to two decimals.
    pub fn write(&self) {
        let value = RecordValue::Rates(RateSnapshot {
            count: self.count,
            mean: round2(self.mean_rate()),
            one_min_rate: round2(self.one_minute_rate()),
            five_min_rate: round2(self.five_minute_rate()),
            fifteen_min_rate: round2(self.fifteen_minute_rate()),
        });
        let record = MeasureRecord {
            name: self.name.clone(),
            kind: MeasureKind::Meter,
            uom: Some(self.uom.clone()),
            value,
            timestamp: Utc::now(),
            correlation_id: self.correlation_id.clone(),
            tags: self.tags.clone(),
        };
        self.sinks.dispatch(&Record::Measure(record));
    }

    /// Stop the rate estimators; rates freeze at their last values.
    pub fn stop(&self) {
        self.m1_rate.stop();
        self.m5_rate.stop();
        self.m15_rate.stop();
    }
}
