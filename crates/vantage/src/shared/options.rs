//! Construction options recognized by every measure
//!
//! Unrecognized concerns fall back to documented defaults; options that only
//! apply to one measure kind (`direct_write`/`resolution` for counters,
//! `cpu`/`mem` for timers) are ignored elsewhere.

use serde::{Deserialize, Serialize};

use super::types::Tag;

/// Default unit-of-measure label.
pub const DEFAULT_UOM: &str = "operation(s)";

/// Configuration accepted by every measure constructor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeasureOptions {
    /// Correlation id attached to every record
    pub correlation_id: String,

    /// Tags attached to every record; caller-supplied duplicates are kept
    pub tags: Vec<Tag>,

    /// Unit-of-measure label
    pub uom: String,

    /// Counter only: write on every `resolution`-th mutation when true
    pub direct_write: bool,

    /// Counter only: mutations between automatic writes; 0 falls back to 1
    pub resolution: u32,

    /// Timer only: attach average CPU utilization as a `cpu` tag
    pub cpu: bool,

    /// Timer only: attach `total_mem`/`free_mem` tags
    pub mem: bool,
}

impl Default for MeasureOptions {
    fn default() -> Self {
        Self {
            correlation_id: String::new(),
            tags: Vec::new(),
            uom: DEFAULT_UOM.to_string(),
            direct_write: true,
            resolution: 1,
            cpu: false,
            mem: false,
        }
    }
}

impl MeasureOptions {
    /// Creates options with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the correlation id.
    pub fn with_correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
        self.correlation_id = correlation_id.into();
        self
    }

    /// Append a single tag.
    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }

    /// Replace the tag sequence.
    pub fn with_tags(mut self, tags: Vec<Tag>) -> Self {
        self.tags = tags;
        self
    }

    /// Set the unit-of-measure label.
    pub fn with_uom(mut self, uom: impl Into<String>) -> Self {
        self.uom = uom.into();
        self
    }

    /// Set whether counter mutations write through automatically.
    pub fn with_direct_write(mut self, direct_write: bool) -> Self {
        self.direct_write = direct_write;
        self
    }

    /// Set the counter write resolution.
    pub fn with_resolution(mut self, resolution: u32) -> Self {
        self.resolution = resolution;
        self
    }

    /// Enable CPU utilization tagging on timers.
    pub fn with_cpu(mut self, cpu: bool) -> Self {
        self.cpu = cpu;
        self
    }

    /// Enable memory tagging on timers.
    pub fn with_mem(mut self, mem: bool) -> Self {
        self.mem = mem;
        self
    }
}
