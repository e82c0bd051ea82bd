//! Health-check measure
//!
//! Structurally a gauge with its own kind: the probe typically answers "is
//! this dependency alive" with a flag, but numeric readings are accepted.

use chrono::Utc;

use crate::error::{MeasureError, MeasureResult};
use crate::measures::gauge::Probe;
use crate::shared::{
    MeasureKind, MeasureOptions, MeasureRecord, ProbeValue, Record, RecordValue, Tag,
};
use crate::sinks::Dispatcher;

/// Probe-based health measure
pub struct HealthCheck {
    name: String,
    uom: String,
    correlation_id: String,
    tags: Vec<Tag>,
    sinks: Dispatcher,
    operation: Probe,
}

impl std::fmt::Debug for HealthCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HealthCheck")
            .field("name", &self.name)
            .field("uom", &self.uom)
            .field("correlation_id", &self.correlation_id)
            .field("tags", &self.tags)
            .finish_non_exhaustive()
    }
}

impl HealthCheck {
    /// Create a health check with default options.
    pub fn new<F, V>(name: impl Into<String>, sinks: Dispatcher, operation: F) -> MeasureResult<Self>
    where
        F: Fn() -> V + Send + Sync + 'static,
        V: Into<ProbeValue>,
    {
        Self::with_options(name, sinks, operation, MeasureOptions::default())
    }

    /// Create a health check with explicit options.
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
        MeasureKind::Health
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

    /// Invoke the probe and emit its value. A panicking probe propagates.
    pub fn write(&self) {
        let value = (self.operation)();
        let record = MeasureRecord {
            name: self.name.clone(),
            kind: MeasureKind::Health,
            uom: Some(self.uom.clone()),
            value: RecordValue::from(value),
            timestamp: Utc::now(),
            correlation_id: self.correlation_id.clone(),
            tags: self.tags.clone(),
        };
        self.sinks.dispatch(&Record::Measure(record));
    }
}
