use crate::config::FormatterConfig;
use crate::duration::{self, DURATION_TAGS};
use crate::entry::LogEntry;
use crate::message::format_message;
use crate::tags::format_tags;
use serde_json::{Map, Value};

/// `timestamp` format: ISO-8601 with microsecond precision and numeric
/// timezone offset, e.g. `2023-12-25T10:00:00.000000+0000`.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f%z";

/// Recognized entry fields, in the order the mapper emits them. Tags
/// come last so a tag can override a reserved field, matching the
/// merge order of the output document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Timestamp,
    Status,
    Logger,
    Pid,
    Message,
    Duration,
    Tags,
}

const FIELD_ORDER: [Field; 7] = [
    Field::Timestamp,
    Field::Status,
    Field::Logger,
    Field::Pid,
    Field::Message,
    Field::Duration,
    Field::Tags,
];

/// Transform one log entry into the Datadog-schema output document.
///
/// Pure function of its inputs; absent fields are simply left out of
/// the document, never emitted as `null` (the message field excepted,
/// per its own rules).
pub fn entry_as_document(entry: &LogEntry, config: &FormatterConfig) -> Map<String, Value> {
    let mut doc = Map::new();

    for field in FIELD_ORDER {
        match field {
            Field::Timestamp => {
                doc.insert(
                    "timestamp".to_string(),
                    Value::String(entry.time.format(TIMESTAMP_FORMAT).to_string()),
                );
            }
            Field::Status => {
                doc.insert(
                    "status".to_string(),
                    Value::String(entry.severity.label().to_string()),
                );
            }
            Field::Logger => {
                let mut logger = Map::new();
                if let Some(name) = non_empty(&entry.program_name) {
                    logger.insert("name".to_string(), Value::String(name.to_string()));
                }
                if let Some(thread) = non_empty(&entry.thread_name) {
                    logger.insert("thread_name".to_string(), Value::String(thread.to_string()));
                }
                if !logger.is_empty() {
                    doc.insert("logger".to_string(), Value::Object(logger));
                }
            }
            Field::Pid => {
                if let Some(pid) = entry.pid {
                    doc.insert("pid".to_string(), Value::from(pid));
                }
            }
            Field::Message => {
                let formatted = format_message(&entry.message, config);
                doc.insert("message".to_string(), formatted.message);
                if let Some(error) = formatted.error {
                    doc.insert("error".to_string(), error);
                }
            }
            Field::Duration => {
                // Units are scanned in declared order; when several
                // duration tags are present the last declared key wins.
                for (key, unit) in DURATION_TAGS {
                    if let Some((_, value)) = entry.tags.iter().find(|(name, _)| name == key) {
                        doc.insert("duration".to_string(), duration::to_nanoseconds(value, unit));
                    }
                }
            }
            Field::Tags => {
                let remaining = entry
                    .tags
                    .iter()
                    .filter(|(name, _)| !duration::is_duration_tag(name));
                for (key, value) in format_tags(remaining, config) {
                    doc.insert(key, value);
                }
            }
        }
    }

    doc
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
