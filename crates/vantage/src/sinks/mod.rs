//! Output sinks and the dispatch path
//!
//! The [`Sink`] contract is deliberately tiny: accept a record, return
//! nothing. Everything downstream of a measure's `write` lives here.

pub mod console;
pub mod dispatch;
pub mod format;

pub use console::ConsoleSink;
pub use dispatch::{Dispatcher, Sink};
pub use format::{datadog_format, simple_format};
