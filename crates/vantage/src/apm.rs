//! APM facade
//!
//! Constructs measures and loggers against a default dispatcher, with an
//! optional per-call override. An empty override falls back to the default
//! target, so callers can thread an optional dispatcher straight through.

use crate::error::MeasureResult;
use crate::logging::Logger;
use crate::measures::{Counter, Gauge, HealthCheck, Meter, Timer};
use crate::shared::{LogLevel, MeasureOptions, ProbeValue, Record, Tag};
use crate::sinks::{datadog_format, simple_format, ConsoleSink, Dispatcher};

/// Application-performance-monitoring facade
#[derive(Debug, Clone)]
pub struct Apm {
    sinks: Dispatcher,
}

impl Apm {
    /// Create a facade dispatching to `sinks` by default.
    pub fn new(sinks: Dispatcher) -> Self {
        Self { sinks }
    }

    /// The default dispatcher.
    pub fn sinks(&self) -> &Dispatcher {
        &self.sinks
    }

    /// Build a counter.
    ///
    /// # Errors
    ///
    /// Propagates construction failures from [`Counter::with_options`].
    pub fn count_operation(
        &self,
        name: impl Into<String>,
        sinks: Option<Dispatcher>,
        options: MeasureOptions,
    ) -> MeasureResult<Counter> {
        Counter::with_options(name, self.resolve(sinks), options)
    }

    /// Build a gauge around `operation`.
    ///
    /// # Errors
    ///
    /// Propagates construction failures from [`Gauge::with_options`].
    pub fn gauge_operation<F, V>(
        &self,
        name: impl Into<String>,
        operation: F,
        sinks: Option<Dispatcher>,
        options: MeasureOptions,
    ) -> MeasureResult<Gauge>
    where
        F: Fn() -> V + Send + Sync + 'static,
        V: Into<ProbeValue>,
    {
        Gauge::with_options(name, self.resolve(sinks), operation, options)
    }

    /// Build a health check around `operation`.
    ///
    /// # Errors
    ///
    /// Propagates construction failures from [`HealthCheck::with_options`].
    pub fn health_operation<F, V>(
        &self,
        name: impl Into<String>,
        operation: F,
        sinks: Option<Dispatcher>,
        options: MeasureOptions,
    ) -> MeasureResult<HealthCheck>
    where
        F: Fn() -> V + Send + Sync + 'static,
        V: Into<ProbeValue>,
    {
        HealthCheck::with_options(name, self.resolve(sinks), operation, options)
    }

    /// Build a timer.
    ///
    /// # Errors
    ///
    /// Propagates construction failures from [`Timer::with_options`].
    pub fn time_operation(
        &self,
        name: impl Into<String>,
        sinks: Option<Dispatcher>,
        options: MeasureOptions,
    ) -> MeasureResult<Timer> {
        Timer::with_options(name, self.resolve(sinks), options)
    }

    /// Build a meter.
    ///
    /// # Errors
    ///
    /// Propagates construction failures from [`Meter::with_options`].
    pub fn meter_operation(
        &self,
        name: impl Into<String>,
        sinks: Option<Dispatcher>,
        options: MeasureOptions,
    ) -> MeasureResult<Meter> {
        Meter::with_options(name, self.resolve(sinks), options)
    }

    /// Build a logger for `context`.
    pub fn logger(
        &self,
        context: impl Into<String>,
        sinks: Option<Dispatcher>,
        tags: Vec<Tag>,
    ) -> Logger {
        Logger::with_tags(context, self.resolve(sinks), tags)
    }

    /// Send raw text through the dispatcher.
    pub fn send_log(&self, message: impl Into<String>, sinks: Option<Dispatcher>) {
        self.resolve(sinks).dispatch(&Record::Text(message.into()));
    }

    fn resolve(&self, sinks: Option<Dispatcher>) -> Dispatcher {
        match sinks {
            Some(dispatcher) if !dispatcher.is_empty() => dispatcher,
            _ => self.sinks.clone(),
        }
    }
}

impl Default for Apm {
    fn default() -> Self {
        Self::new(Dispatcher::fan_out(Vec::new()))
    }
}

/// Facade over a console sink printing JSON lines at `Info`.
pub fn default_apm() -> Apm {
    Apm::new(Dispatcher::sink(ConsoleSink::new(LogLevel::Info)))
}

/// Facade over a console sink using the simple line format at `Info`.
pub fn default_console_apm() -> Apm {
    Apm::new(Dispatcher::sink(ConsoleSink::with_formatter(LogLevel::Info, simple_format)))
}

/// Facade over a console sink using the DataDog line format at `Info`.
pub fn default_datadog_apm() -> Apm {
    Apm::new(Dispatcher::sink(ConsoleSink::with_formatter(LogLevel::Info, datadog_format)))
}
