//! Shared vocabulary: measure kinds, tags, records, and options
//!
//! Everything a sink or measure needs to agree on lives here so the measure
//! and sink modules depend on one set of types instead of each other.

pub mod options;
pub mod record;
pub mod types;

// Re-export commonly used types for convenience
pub use options::{MeasureOptions, DEFAULT_UOM};
pub use record::{LogRecord, MeasureRecord, RateSnapshot, Record, RecordValue};
pub use types::{
    add_tag_if_absent, tags_contain_key, LogLevel, MeasureKind, ProbeValue, Tag, TagValue,
};
