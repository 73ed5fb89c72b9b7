use serde_json::{Map, Value};
use std::fmt;

/// Value attached to a log entry as its message or as a tag.
///
/// Closed over everything the Datadog mapping distinguishes: JSON-like
/// data plus captured errors, which the formatters expand into a
/// structured `error` object instead of serializing as plain data.
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Seq(Vec<TagValue>),
    /// Insertion-ordered mapping. Kept as a pair list so nested tag
    /// processing follows the order keys were added.
    Map(Vec<(String, TagValue)>),
    Error(ExceptionValue),
}

impl TagValue {
    pub fn is_null(&self) -> bool {
        matches!(self, TagValue::Null)
    }

    /// Render this value as plain JSON. Captured errors fall back to
    /// their display form; structured expansion is the formatters' job.
    pub fn to_json(&self) -> Value {
        match self {
            TagValue::Null => Value::Null,
            TagValue::Bool(b) => Value::Bool(*b),
            TagValue::Int(n) => Value::from(*n),
            TagValue::Float(n) => Value::from(*n),
            TagValue::Str(s) => Value::String(s.clone()),
            TagValue::Seq(items) => Value::Array(items.iter().map(TagValue::to_json).collect()),
            TagValue::Map(pairs) => {
                let mut map = Map::new();
                for (key, value) in pairs {
                    map.insert(key.clone(), value.to_json());
                }
                Value::Object(map)
            }
            TagValue::Error(err) => Value::String(err.to_string()),
        }
    }
}

impl From<bool> for TagValue {
    fn from(value: bool) -> Self {
        TagValue::Bool(value)
    }
}

impl From<i32> for TagValue {
    fn from(value: i32) -> Self {
        TagValue::Int(value as i64)
    }
}

impl From<i64> for TagValue {
    fn from(value: i64) -> Self {
        TagValue::Int(value)
    }
}

impl From<u32> for TagValue {
    fn from(value: u32) -> Self {
        TagValue::Int(value as i64)
    }
}

impl From<u64> for TagValue {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(n) => TagValue::Int(n),
            Err(_) => TagValue::Float(value as f64),
        }
    }
}

impl From<f64> for TagValue {
    fn from(value: f64) -> Self {
        TagValue::Float(value)
    }
}

impl From<&str> for TagValue {
    fn from(value: &str) -> Self {
        TagValue::Str(value.to_string())
    }
}

impl From<String> for TagValue {
    fn from(value: String) -> Self {
        TagValue::Str(value)
    }
}

impl From<ExceptionValue> for TagValue {
    fn from(value: ExceptionValue) -> Self {
        TagValue::Error(value)
    }
}

impl<T: Into<TagValue>> From<Vec<T>> for TagValue {
    fn from(values: Vec<T>) -> Self {
        TagValue::Seq(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<TagValue>> From<Option<T>> for TagValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(TagValue::Null, Into::into)
    }
}

impl From<Value> for TagValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => TagValue::Null,
            Value::Bool(b) => TagValue::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    TagValue::Int(i)
                } else {
                    TagValue::Float(n.as_f64().unwrap_or(0.0))
                }
            }
            Value::String(s) => TagValue::Str(s),
            Value::Array(items) => TagValue::Seq(items.into_iter().map(TagValue::from).collect()),
            Value::Object(map) => {
                TagValue::Map(map.into_iter().map(|(k, v)| (k, TagValue::from(v))).collect())
            }
        }
    }
}

/// Captured error carried by a log entry, either as the message itself
/// or as the value of the `error` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExceptionValue {
    /// Error type name, e.g. "RuntimeError".
    pub kind: String,
    pub message: Option<String>,
    /// Raw backtrace lines, if one was captured.
    pub backtrace: Option<Vec<String>>,
}

impl ExceptionValue {
    pub fn new(kind: impl Into<String>) -> Self {
        ExceptionValue {
            kind: kind.into(),
            message: None,
            backtrace: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_backtrace(mut self, lines: Vec<String>) -> Self {
        self.backtrace = Some(lines);
        self
    }

    /// Capture a concrete error value, deriving `kind` from the last
    /// segment of its type name.
    pub fn from_error<E: std::error::Error>(err: &E) -> Self {
        let full = std::any::type_name::<E>();
        let kind = full.rsplit("::").next().unwrap_or(full);
        ExceptionValue::new(kind).with_message(err.to_string())
    }
}

impl fmt::Display for ExceptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{}: {}", self.kind, message),
            None => write!(f, "{}", self.kind),
        }
    }
}
