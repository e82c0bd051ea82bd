//! Counter measure
//!
//! A bounded count with a write-resolution throttle: every mutation bumps an
//! iteration counter, and in direct-write mode every `resolution`-th
//! iteration emits the current count to the dispatcher.

use chrono::Utc;

use crate::error::{MeasureError, MeasureResult};
use crate::shared::{MeasureKind, MeasureOptions, MeasureRecord, Record, RecordValue, Tag};
use crate::sinks::Dispatcher;

/// Upper bound of the observable count range (`2^32`, inclusive).
pub const MAX_COUNTER_VALUE: i64 = 1 << 32;

/// Count-based measure with saturating floor and single-step wrap ceiling
pub struct Counter {
    name: String,
    uom: String,
    correlation_id: String,
    tags: Vec<Tag>,
    sinks: Dispatcher,
    count: i64,
    iterations: u64,
    resolution: u64,
    direct_write: bool,
}

impl std::fmt::Debug for Counter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Counter")
            .field("name", &self.name)
            .field("uom", &self.uom)
            .field("correlation_id", &self.correlation_id)
            .field("tags", &self.tags)
            .field("count", &self.count)
            .field("iterations", &self.iterations)
            .field("resolution", &self.resolution)
            .field("direct_write", &self.direct_write)
            .finish()
    }
}

impl Counter {
    /// Create a counter with default options.
    pub fn new(name: impl Into<String>, sinks: Dispatcher) -> MeasureResult<Self> {
        Self::with_options(name, sinks, MeasureOptions::default())
    }

    /// Create a counter with explicit options.
    ///
    /// # Errors
    ///
    /// Returns [`MeasureError::MissingName`] when `name` is empty.
    pub fn with_options(
        name: impl Into<String>,
        sinks: Dispatcher,
        options: MeasureOptions,
    ) -> MeasureResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(MeasureError::MissingName);
        }
        Ok(Self {
            name,
            uom: options.uom,
            correlation_id: options.correlation_id,
            tags: options.tags,
            sinks,
            count: 0,
            iterations: 0,
            // A zeroed config must not disable the write gate
            resolution: u64::from(options.resolution.max(1)),
            direct_write: options.direct_write,
        })
    }

    /// Measure name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Kind discriminant.
    pub fn kind(&self) -> MeasureKind {
        MeasureKind::Counter
    }

    /// Current count.
    pub fn count(&self) -> i64 {
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

    /// Mutations between automatic writes.
    pub fn resolution(&self) -> u64 {
        self.resolution
    }

    /// Whether mutations write through automatically.
    pub fn direct_write(&self) -> bool {
        self.direct_write
    }

    /// Tags attached to every record.
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Increment the counter by one.
    pub fn increment(&mut self) {
        self.increment_by(1);
    }

    /// Increment the counter by `value`; negative values subtract.
    pub fn increment_by(&mut self, value: i64) {
        self.apply(value);
    }

    /// Decrement the counter by one.
    pub fn decrement(&mut self) {
        self.decrement_by(1);
    }

    /// Decrement the counter by `value`; negative values add.
    pub fn decrement_by(&mut self, value: i64) {
        self.apply(value.saturating_neg());
    }

    /// Reset the count to zero. Counts as a mutation toward the resolution
    /// cycle, which itself is not reset.
    pub fn reset(&mut self) {
        self.count = 0;
        self.tally();
    }

    /// Unconditionally emit the current count to the dispatcher.
    pub fn write(&self) {
        let record = MeasureRecord {
            name: self.name.clone(),
            kind: MeasureKind::Counter,
            uom: Some(self.uom.clone()),
            value: RecordValue::Scalar(self.count as f64),
            timestamp: Utc::now(),
            correlation_id: self.correlation_id.clone(),
            tags: self.tags.clone(),
        };
        self.sinks.dispatch(&Record::Measure(record));
    }

    fn apply(&mut self, delta: i64) {
        self.count = self.count.saturating_add(delta);
        self.clamp_range();
        self.tally();
    }

    // Floor saturates at zero; the ceiling wraps by a single subtraction of
    // MAX_COUNTER_VALUE + 1, not a modulo. One oversized step can therefore
    // land above the ceiling; that is the documented behavior.
    fn clamp_range(&mut self) {
        if self.count < 0 {
            self.count = 0;
        } else if self.count > MAX_COUNTER_VALUE {
            self.count -= MAX_COUNTER_VALUE + 1;
        }
    }

    fn tally(&mut self) {
        self.iterations += 1;
        if self.direct_write && self.iterations % self.resolution == 0 {
            self.write();
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for measures::counter.
    use std::sync::Arc;

    use super::*;
    use crate::testing::RecordingSink;

    fn recording_counter(options: MeasureOptions) -> (Counter, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::new());
        let dispatcher = Dispatcher::fan_out(vec![Arc::clone(&sink) as Arc<dyn crate::sinks::Sink>]);
        let counter = Counter::with_options("test-counter", dispatcher, options).unwrap();
        (counter, sink)
    }

    /// Validates `Counter::with_options` behavior for the default options
    /// scenario.
    ///
    /// Assertions:
    /// - Confirms `counter.name()` equals `"test-counter"`.
    /// - Confirms `counter.kind()` equals `MeasureKind::Counter`.
    /// - Confirms `counter.uom()` equals `"operation(s)"`.
    /// - Confirms `counter.correlation_id()` equals `""`.
    /// - Confirms `counter.resolution()` equals `1`.
    /// - Ensures `counter.direct_write()` evaluates to true.
    #[test]
    fn test_default_construction() {
        let (counter, _sink) = recording_counter(MeasureOptions::default());
        assert_eq!(counter.name(), "test-counter");
        assert_eq!(counter.kind(), MeasureKind::Counter);
        assert_eq!(counter.uom(), "operation(s)");
        assert_eq!(counter.correlation_id(), "");
        assert_eq!(counter.resolution(), 1);
        assert!(counter.direct_write());
    }

    /// Validates `Counter::new` behavior for the empty name scenario.
    ///
    /// Assertions:
    /// - Confirms the constructor error equals `MeasureError::MissingName`.
    #[test]
    fn test_empty_name_rejected() {
        let result = Counter::new("", Dispatcher::fan_out(Vec::new()));
        assert_eq!(result.unwrap_err(), MeasureError::MissingName);
    }

    /// Validates `Counter::increment_by` behavior for the in-range scenario.
    ///
    /// Assertions:
    /// - Confirms `counter.count()` equals `MAX_COUNTER_VALUE` after a single
    ///   full-range increment from zero.
    #[test]
    fn test_increment_full_range() {
        let (mut counter, _sink) =
            recording_counter(MeasureOptions::new().with_direct_write(false));
        counter.increment_by(MAX_COUNTER_VALUE);
        assert_eq!(counter.count(), MAX_COUNTER_VALUE);
    }

    /// Validates `Counter::increment` behavior for the boundary wrap
    /// scenario.
    ///
    /// Assertions:
    /// - Confirms `counter.count()` equals `0` after incrementing one past
    ///   `MAX_COUNTER_VALUE`.
    #[test]
    fn test_single_step_wrap_at_boundary() {
        let (mut counter, _sink) =
            recording_counter(MeasureOptions::new().with_direct_write(false));
        counter.increment_by(MAX_COUNTER_VALUE);
        counter.increment();
        assert_eq!(counter.count(), 0);
    }

    /// Validates `Counter::decrement` behavior for the floor clamp scenario.
    ///
    /// Assertions:
    /// - Confirms `counter.count()` equals `0` immediately after going below
    ///   zero.
    /// - Confirms `counter.count()` equals `3` after recovering.
    #[test]
    fn test_floor_clamps_to_zero() {
        let (mut counter, _sink) =
            recording_counter(MeasureOptions::new().with_direct_write(false));
        counter.increment_by(5);
        counter.decrement_by(10);
        assert_eq!(counter.count(), 0);

        counter.increment_by(3);
        assert_eq!(counter.count(), 3);
    }

    /// Validates negative arguments for the inverted mutation scenario.
    ///
    /// Assertions:
    /// - Confirms `increment_by(-4)` subtracts.
    /// - Confirms `decrement_by(-4)` adds.
    #[test]
    fn test_negative_values_invert() {
        let (mut counter, _sink) =
            recording_counter(MeasureOptions::new().with_direct_write(false));
        counter.increment_by(10);
        counter.increment_by(-4);
        assert_eq!(counter.count(), 6);

        counter.decrement_by(-4);
        assert_eq!(counter.count(), 10);
    }

    /// Validates `Counter` write gating for the resolution scenario.
    ///
    /// Assertions:
    /// - Confirms ten mutations at resolution 5 equal `2` dispatcher writes.
    /// - Confirms ten mutations at resolution 1 equal `10` dispatcher writes.
    #[test]
    fn test_resolution_gates_writes() {
        let (mut counter, sink) = recording_counter(MeasureOptions::new().with_resolution(5));
        for _ in 0..10 {
            counter.increment();
        }
        assert_eq!(sink.message_count(), 2);

        let (mut counter, sink) = recording_counter(MeasureOptions::new().with_resolution(1));
        for _ in 0..10 {
            counter.increment();
        }
        assert_eq!(sink.message_count(), 10);
    }

    /// Validates `Counter::reset` behavior for the resolution-cycle scenario.
    ///
    /// Assertions:
    /// - Confirms `counter.count()` equals `0` after reset.
    /// - Confirms reset advances the iteration cycle rather than restarting
    ///   it.
    #[test]
    fn test_reset_counts_as_mutation() {
        let (mut counter, sink) = recording_counter(MeasureOptions::new().with_resolution(3));
        counter.increment();
        counter.increment();
        assert_eq!(sink.message_count(), 0);

        counter.reset();
        assert_eq!(counter.count(), 0);
        assert_eq!(sink.message_count(), 1);
    }

    /// Validates `Counter::write` behavior for the silent accumulation
    /// scenario.
    ///
    /// Assertions:
    /// - Confirms `sink.message_count()` equals `0` after mutations with
    ///   direct write disabled.
    /// - Confirms `sink.message_count()` equals `1` after an explicit write.
    /// - Confirms the emitted value equals the accumulated count.
    #[test]
    fn test_direct_write_disabled() {
        let (mut counter, sink) =
            recording_counter(MeasureOptions::new().with_direct_write(false));
        for _ in 0..7 {
            counter.increment();
        }
        assert_eq!(sink.message_count(), 0);

        counter.write();
        assert_eq!(sink.message_count(), 1);
        let measures = sink.measures();
        assert_eq!(measures[0].value, RecordValue::Scalar(7.0));
        assert_eq!(measures[0].uom.as_deref(), Some("operation(s)"));
    }
}
