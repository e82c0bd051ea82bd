//! Core vocabulary shared by every measure: kinds, levels, tags, and probe
//! values.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::Error as DeError;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Discriminant carried by every measure instance and record.
///
/// Generic instrumentation code dispatches on this value instead of probing
/// the concrete measure shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeasureKind {
    /// A count-based measure
    Counter,
    /// A probe-based point-in-time measure
    Gauge,
    /// A rate-of-events measure
    Meter,
    /// An elapsed-time measure
    Timer,
    /// A probe-based health measure
    Health,
}

impl MeasureKind {
    /// Static name of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Counter => "Counter",
            Self::Gauge => "Gauge",
            Self::Meter => "Meter",
            Self::Timer => "Timer",
            Self::Health => "Health",
        }
    }
}

impl fmt::Display for MeasureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logging severity levels, ordered from most to least detailed
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Most detailed level of logging
    Verbose,
    /// Lower level diagnostics
    Debug,
    /// General logging
    #[default]
    Info,
    /// Unusual although handled conditions
    Warning,
    /// Unhandled failures
    Error,
    /// Application or process major failure
    Critical,
}

impl LogLevel {
    /// Static name of the level.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Verbose => "VERBOSE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Primitive payload of a key-value tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagValue {
    /// Text payload
    Text(String),
    /// Numeric payload
    Number(f64),
    /// Boolean payload
    Flag(bool),
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(value) => f.write_str(value),
            Self::Number(value) => write!(f, "{value}"),
            Self::Flag(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for TagValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for TagValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for TagValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for TagValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

/// A label attached to a record: either a bare string or a single-key value
/// mapping.
///
/// Serialized as the bare string or as a one-entry JSON object, matching the
/// shape sinks receive.
#[derive(Debug, Clone, PartialEq)]
pub enum Tag {
    /// Bare string tag
    Label(String),
    /// Single-key value mapping
    KeyValue {
        /// Tag key
        key: String,
        /// Tag payload
        value: TagValue,
    },
}

impl Tag {
    /// Builds a bare string tag.
    pub fn label(text: impl Into<String>) -> Self {
        Self::Label(text.into())
    }

    /// Builds a key-value tag.
    pub fn key_value(key: impl Into<String>, value: impl Into<TagValue>) -> Self {
        Self::KeyValue { key: key.into(), value: value.into() }
    }

    /// Whether this tag occupies `key`: a label matches by its own text, a
    /// key-value tag by its key.
    pub fn matches_key(&self, key: &str) -> bool {
        match self {
            Self::Label(text) => text == key,
            Self::KeyValue { key: own, .. } => own == key,
        }
    }
}

impl Serialize for Tag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Label(text) => serializer.serialize_str(text),
            Self::KeyValue { key, value } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(key, value)?;
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Tag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Label(String),
            Map(BTreeMap<String, TagValue>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Label(text) => Ok(Self::Label(text)),
            Repr::Map(map) => {
                let mut entries = map.into_iter();
                let (key, value) = entries
                    .next()
                    .ok_or_else(|| DeError::custom("tag object must not be empty"))?;
                if entries.next().is_some() {
                    return Err(DeError::custom("tag object must have exactly one key"));
                }
                Ok(Self::KeyValue { key, value })
            }
        }
    }
}

/// Whether any tag in `tags` occupies `key`.
pub fn tags_contain_key(tags: &[Tag], key: &str) -> bool {
    tags.iter().any(|tag| tag.matches_key(key))
}

/// Appends a key-value tag only when `key` is not already occupied.
///
/// This is the insertion rule used for process-derived tags: a caller-supplied
/// tag under the same key wins.
pub fn add_tag_if_absent(tags: &mut Vec<Tag>, key: &str, value: impl Into<TagValue>) {
    if !tags_contain_key(tags, key) {
        tags.push(Tag::key_value(key, value));
    }
}

/// Value returned by a gauge or health-check probe
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProbeValue {
    /// Numeric reading
    Number(f64),
    /// Boolean reading
    Flag(bool),
}

impl From<f64> for ProbeValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<u64> for ProbeValue {
    fn from(value: u64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<i32> for ProbeValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<bool> for ProbeValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for shared::types.
    use super::*;

    /// Validates `LogLevel` ordering for the severity threshold scenario.
    ///
    /// Assertions:
    /// - Ensures `LogLevel::Verbose < LogLevel::Debug` evaluates to true.
    /// - Ensures `LogLevel::Error < LogLevel::Critical` evaluates to true.
    /// - Ensures `LogLevel::Info >= LogLevel::Info` evaluates to true.
    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Verbose < LogLevel::Debug);
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warning);
        assert!(LogLevel::Warning < LogLevel::Error);
        assert!(LogLevel::Error < LogLevel::Critical);
        assert!(LogLevel::Info >= LogLevel::Info);
    }

    /// Validates `Tag::matches_key` behavior for both tag shapes.
    ///
    /// Assertions:
    /// - Ensures `Tag::label("region").matches_key("region")` evaluates to
    ///   true.
    /// - Ensures `Tag::key_value("cpu", 42.0).matches_key("cpu")` evaluates to
    ///   true.
    /// - Ensures `Tag::key_value("cpu", 42.0).matches_key("mem")` evaluates to
    ///   false.
    #[test]
    fn test_tag_key_matching() {
        assert!(Tag::label("region").matches_key("region"));
        assert!(Tag::key_value("cpu", 42.0).matches_key("cpu"));
        assert!(!Tag::key_value("cpu", 42.0).matches_key("mem"));
        assert!(!Tag::label("region").matches_key("cpu"));
    }

    /// Validates `add_tag_if_absent` behavior for the first-write-wins
    /// scenario.
    ///
    /// Assertions:
    /// - Confirms `tags.len()` equals `2`.
    /// - Confirms the `cpu` tag still carries the caller-supplied value.
    #[test]
    fn test_add_tag_if_absent() {
        let mut tags = vec![Tag::key_value("cpu", "abc")];
        add_tag_if_absent(&mut tags, "cpu", 99.0);
        add_tag_if_absent(&mut tags, "total_mem", 1024.0);

        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0], Tag::key_value("cpu", "abc"));
        assert_eq!(tags[1], Tag::key_value("total_mem", 1024.0));
    }

    /// Validates `Tag` serialization round-trip for both shapes.
    ///
    /// Assertions:
    /// - Confirms a label serializes to a JSON string.
    /// - Confirms a key-value tag serializes to a one-entry JSON object.
    /// - Confirms both deserialize back to the original tag.
    #[test]
    fn test_tag_serde_round_trip() {
        let label = Tag::label("primary");
        let json = serde_json::to_string(&label).unwrap();
        assert_eq!(json, "\"primary\"");
        assert_eq!(serde_json::from_str::<Tag>(&json).unwrap(), label);

        let kv = Tag::key_value("zone", "us-east");
        let json = serde_json::to_string(&kv).unwrap();
        assert_eq!(json, "{\"zone\":\"us-east\"}");
        assert_eq!(serde_json::from_str::<Tag>(&json).unwrap(), kv);
    }

    /// Validates `Tag` deserialization rejection of multi-key objects.
    ///
    /// Assertions:
    /// - Ensures `serde_json::from_str::<Tag>(..).is_err()` evaluates to true.
    #[test]
    fn test_tag_rejects_multi_key_objects() {
        assert!(serde_json::from_str::<Tag>("{\"a\":1,\"b\":2}").is_err());
        assert!(serde_json::from_str::<Tag>("{}").is_err());
    }

    /// Validates `ProbeValue` conversions for the probe ergonomics scenario.
    ///
    /// Assertions:
    /// - Confirms `ProbeValue::from(3.5)` equals `ProbeValue::Number(3.5)`.
    /// - Confirms `ProbeValue::from(true)` equals `ProbeValue::Flag(true)`.
    #[test]
    fn test_probe_value_conversions() {
        assert_eq!(ProbeValue::from(3.5), ProbeValue::Number(3.5));
        assert_eq!(ProbeValue::from(7_u64), ProbeValue::Number(7.0));
        assert_eq!(ProbeValue::from(-2_i32), ProbeValue::Number(-2.0));
        assert_eq!(ProbeValue::from(true), ProbeValue::Flag(true));
    }
}
