use crate::config::FormatterConfig;
use crate::exception::exception_info_value;
use crate::value::TagValue;
use serde_json::Value;

/// Contribution of the message field to the output document.
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedMessage {
    pub message: Value,
    /// Structured error object, present when the message itself was a
    /// captured error.
    pub error: Option<Value>,
}

/// Format the message field.
///
/// Captured errors produce both a display-form `message` and a
/// structured `error` object. Mappings pass through verbatim. Anything
/// else is stringified and hard-truncated to the configured limit.
/// Total over all inputs; never fails.
pub fn format_message(message: &TagValue, config: &FormatterConfig) -> FormattedMessage {
    match message {
        TagValue::Error(err) => FormattedMessage {
            message: Value::String(err.to_string()),
            error: Some(exception_info_value(err, config)),
        },
        TagValue::Map(_) => FormattedMessage {
            message: message.to_json(),
            error: None,
        },
        TagValue::Null => FormattedMessage {
            message: Value::Null,
            error: None,
        },
        other => FormattedMessage {
            message: Value::String(truncate(stringify(other), config.max_message_length)),
            error: None,
        },
    }
}

fn stringify(value: &TagValue) -> String {
    match value.to_json() {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

fn truncate(mut text: String, limit: Option<usize>) -> String {
    if let Some(max) = limit {
        if let Some((idx, _)) = text.char_indices().nth(max) {
            text.truncate(idx);
        }
    }
    text
}
