//! Line formatters for the console sink

use chrono::{SecondsFormat, Utc};

use crate::shared::{Record, RecordValue, Tag};

fn json_or_empty<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

/// Human-oriented line format: `MESSAGE | ...`, `LOG | ...`, `MEASURE | ...`.
pub fn simple_format(record: &Record) -> String {
    match record {
        Record::Text(text) => {
            let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
            format!("MESSAGE | {now} | {text}")
        }
        Record::Log(log) => format!("LOG | {}", json_or_empty(log)),
        Record::Measure(measure) => format!("MEASURE | {}", json_or_empty(measure)),
    }
}

fn render_tag(tag: &Tag) -> String {
    match tag {
        Tag::Label(text) => text.clone(),
        Tag::KeyValue { key, value } => format!("{key}:{value}"),
    }
}

fn render_tags(tags: &[Tag]) -> String {
    if tags.is_empty() {
        return String::new();
    }
    let rendered: Vec<String> = tags.iter().map(render_tag).collect();
    format!("|#{}", rendered.join(","))
}

/// DataDog-style monitoring line:
/// `MONITORING|epoch|value|type|name|#tag,key:value`.
///
/// Meter snapshots emit their mean as the value and append the count and the
/// minute rates as tags; health flags render as `true`/`false`.
pub fn datadog_format(record: &Record) -> String {
    match record {
        Record::Text(text) => {
            let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
            format!("MESSAGE | {now} | {text}")
        }
        Record::Log(log) => format!("LOG | {}", json_or_empty(log)),
        Record::Measure(measure) => {
            let epoch = measure.timestamp.timestamp();
            let kind = measure.kind.as_str().to_lowercase();
            let mut tags = measure.tags.clone();
            let value = match &measure.value {
                RecordValue::Flag(flag) => flag.to_string(),
                RecordValue::Scalar(scalar) => format!("{scalar:.4}"),
                RecordValue::Rates(rates) => {
                    tags.push(Tag::key_value("count", rates.count as f64));
                    tags.push(Tag::key_value("one_min_rate", rates.one_min_rate));
                    tags.push(Tag::key_value("five_min_rate", rates.five_min_rate));
                    tags.push(Tag::key_value("fifteen_min_rate", rates.fifteen_min_rate));
                    format!("{:.2}", rates.mean)
                }
            };
            format!("MONITORING|{epoch}|{value}|{kind}|{}{}", measure.name, render_tags(&tags))
        }
    }
}
