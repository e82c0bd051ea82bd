//! Timer measure
//!
//! Measures the elapsed time of one operation at a time: `start` arms a fresh
//! stopwatch, `stop` completes it, records the duration, and writes through
//! the dispatcher. Optional CPU and memory tags are sampled across the
//! start/stop interval.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use crate::error::{MeasureError, MeasureResult};
use crate::measures::process::{memory_snapshot, CpuTracker};
use crate::measures::stopwatch::StopWatch;
use crate::shared::{
    add_tag_if_absent, MeasureKind, MeasureOptions, MeasureRecord, Record, RecordValue, Tag,
};
use crate::sinks::Dispatcher;
use crate::time::{Clock, SystemClock};

/// Elapsed-time measure with an at-most-one-active-interval state machine
pub struct Timer {
    name: String,
    correlation_id: String,
    tags: Vec<Tag>,
    sinks: Dispatcher,
    show_cpu: bool,
    show_memory: bool,
    active: bool,
    watch: Option<StopWatch>,
    elapsed: Option<Duration>,
    cpu: Option<CpuTracker>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for Timer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Timer")
            .field("name", &self.name)
            .field("correlation_id", &self.correlation_id)
            .field("tags", &self.tags)
            .field("show_cpu", &self.show_cpu)
            .field("show_memory", &self.show_memory)
            .field("active", &self.active)
            .field("elapsed", &self.elapsed)
            .finish_non_exhaustive()
    }
}

impl Timer {
    /// Create a timer with default options.
    pub fn new(name: impl Into<String>, sinks: Dispatcher) -> MeasureResult<Self> {
        Self::with_options(name, sinks, MeasureOptions::default())
    }

    /// Create a timer with explicit options.
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

    /// Create a timer reading elapsed time from the supplied clock.
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
        Ok(Self {
            name,
            correlation_id: options.correlation_id,
            tags: options.tags,
            sinks,
            show_cpu: options.cpu,
            show_memory: options.mem,
            active: false,
            watch: None,
            elapsed: None,
            cpu: None,
            clock,
        })
    }

    /// Measure name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Kind discriminant.
    pub fn kind(&self) -> MeasureKind {
        MeasureKind::Timer
    }

    /// Correlation id.
    pub fn correlation_id(&self) -> &str {
        &self.correlation_id
    }

    /// Tags attached to every record.
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Whether an interval is currently being measured.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Duration recorded by the last completed interval.
    pub fn elapsed(&self) -> Option<Duration> {
        self.elapsed
    }

    /// Start measuring an interval.
    ///
    /// # Errors
    ///
    /// Returns [`MeasureError::TimerAlreadyRunning`] when an interval is
    /// already outstanding; the running stopwatch is left untouched.
    pub fn start(&mut self) -> MeasureResult<()> {
        if self.active {
            return Err(MeasureError::TimerAlreadyRunning);
        }
        self.active = true;
        self.watch = Some(StopWatch::with_clock(Arc::clone(&self.clock)));
        if self.show_cpu {
            self.cpu.get_or_insert_with(CpuTracker::new).begin();
        }
        tracing::trace!(timer = %self.name, "timer started");
        Ok(())
    }

    /// Complete the outstanding interval: record its elapsed time, write the
    /// record, and return to idle. A no-op when nothing was started.
    pub fn stop(&mut self) {
        let Some(mut watch) = self.watch.take() else {
            return;
        };
        if let Some(elapsed) = watch.end() {
            self.elapsed = Some(elapsed);
            self.write();
            self.active = false;
            tracing::trace!(timer = %self.name, elapsed_ms = elapsed.as_secs_f64() * 1000.0, "timer stopped");
        }
    }

    /// Emit the last recorded elapsed time, in fractional milliseconds.
    ///
    /// Process-derived tags are appended with first-write-wins semantics: a
    /// caller-supplied `cpu`, `total_mem`, or `free_mem` tag is never
    /// overwritten.
    pub fn write(&mut self) {
        let tags = self.tags_with_process_data();
        let elapsed_ms =
            self.elapsed.map(|elapsed| elapsed.as_secs_f64() * 1000.0).unwrap_or_default();
        let record = MeasureRecord {
            name: self.name.clone(),
            kind: MeasureKind::Timer,
            uom: None,
            value: RecordValue::Scalar(elapsed_ms),
            timestamp: Utc::now(),
            correlation_id: self.correlation_id.clone(),
            tags,
        };
        self.sinks.dispatch(&Record::Measure(record));
    }

    fn tags_with_process_data(&mut self) -> Vec<Tag> {
        let mut tags = self.tags.clone();
        if self.show_cpu {
            if let Some(tracker) = self.cpu.as_mut() {
                let utilization = tracker.utilization();
                add_tag_if_absent(&mut tags, "cpu", utilization);
            }
        }
        if self.show_memory {
            let memory = memory_snapshot();
            add_tag_if_absent(&mut tags, "total_mem", memory.total as f64);
            add_tag_if_absent(&mut tags, "free_mem", memory.free as f64);
        }
        tags
    }
}
