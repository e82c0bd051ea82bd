//! Gauge measure
//!
//! A named, tagged wrapper around an external probe. Stateless between
//! writes: every `write` invokes the probe synchronously and emits its raw
//! return value.

use chrono::Utc;

use crate::error::{MeasureError, MeasureResult};
use crate::shared::{
    MeasureKind, MeasureOptions, MeasureRecord, ProbeValue, Record, RecordValue, Tag,
};
use crate::sinks::Dispatcher;

/// Zero-argument probe invoked at write time.
pub type Probe = Box<dyn Fn() -> ProbeValue + Send + Sync>;

/// Probe-based point-in-time measure
pub struct Gauge {
    name: String,
    uom: String,
    correlation_id: String,
    tags: Vec<Tag>,
    sinks: Dispatcher,
    operation: Probe,
}

impl std::fmt::Debug for Gauge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gauge")
            .field("name", &self.name)
            .field("uom", &self.uom)
            .field("correlation_id", &self.correlation_id)
            .field("tags", &self.tags)
            .finish_non_exhaustive()
    }
}

impl Gauge {
    /// Create a gauge with default options.
    pub fn new<F, V>(name: impl Into<String>, sinks: Dispatcher, operation: F) -> MeasureResult<Self>
    where
        F: Fn() -> V + Send + Sync + 'static,
        V: Into<ProbeValue>,
    {
        Self::with_options(name, sinks, operation, MeasureOptions::default())
    }

    /// Create a gauge with explicit options.
    ///
    /// # Errors
    ///
    /// Returns [`MeasureError::MissingName`] when `name` is empty.
    pub fn with_options<F, V>(
        name: impl Into<String>,
        sinks: Dispatcher,
        operation: F,
        options: MeasureOptions,
    ) -> MeasureResult<Self>
    where
        F: Fn() -> V + Send + Sync + 'static,
        V: Into<ProbeValue>,
    {
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
            operation: Box::new(move || operation().into()),
        })
    }

    /// Measure name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Kind discriminant.
    pub fn kind(&self) -> MeasureKind {
        MeasureKind::Gauge
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

    /// Invoke the probe and emit its value.
    ///
    /// The probe runs synchronously; a panicking probe propagates to the
    /// caller and nothing is emitted.
    pub fn write(&self) {
        let value = (self.operation)();
        let record = MeasureRecord {
            name: self.name.clone(),
            kind: MeasureKind::Gauge,
            uom: Some(self.uom.clone()),
            value: RecordValue::from(value),
            timestamp: Utc::now(),
            correlation_id: self.correlation_id.clone(),
            tags: self.tags.clone(),
        };
        self.sinks.dispatch(&Record::Measure(record));
    }
}
