use crate::value::TagValue;
use serde_json::Value;

/// Unit attached to a duration-style tag key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationUnit {
    Seconds,
    Milliseconds,
    Microseconds,
    Nanoseconds,
}

impl DurationUnit {
    pub fn nanos_per_unit(&self) -> i64 {
        match self {
            DurationUnit::Seconds => 1_000_000_000,
            DurationUnit::Milliseconds => 1_000_000,
            DurationUnit::Microseconds => 1_000,
            DurationUnit::Nanoseconds => 1,
        }
    }
}

/// Tag keys the mapper consumes as durations, in scan order. When an
/// entry carries more than one of these, the last key in this list
/// wins.
pub const DURATION_TAGS: [(&str, DurationUnit); 4] = [
    ("duration", DurationUnit::Seconds),
    ("duration_ms", DurationUnit::Milliseconds),
    ("duration_micros", DurationUnit::Microseconds),
    ("duration_ns", DurationUnit::Nanoseconds),
];

pub fn is_duration_tag(name: &str) -> bool {
    DURATION_TAGS.iter().any(|(key, _)| *key == name)
}

/// Convert a duration tag value to whole nanoseconds, rounding to the
/// nearest integer. Non-numeric values pass through unconverted.
pub fn to_nanoseconds(value: &TagValue, unit: DurationUnit) -> Value {
    match value {
        TagValue::Int(n) => Value::from(n.saturating_mul(unit.nanos_per_unit())),
        TagValue::Float(n) => Value::from((n * unit.nanos_per_unit() as f64).round() as i64),
        other => other.to_json(),
    }
}
