use crate::config::FormatterConfig;
use crate::value::ExceptionValue;
use serde::Serialize;
use serde_json::Value;

/// Structured `error` object in the Datadog log schema.
///
/// `trace` is omitted when the source error carried no backtrace; an
/// empty backtrace (including one produced by the cleaner) is emitted
/// as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExceptionInfo {
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<Vec<String>>,
}

/// Build the structured error object for a captured error, running the
/// backtrace through the configured cleaner if there is one.
pub fn exception_info(error: &ExceptionValue, config: &FormatterConfig) -> ExceptionInfo {
    let trace = error.backtrace.as_ref().map(|lines| match &config.backtrace_cleaner {
        Some(cleaner) => cleaner(lines.clone()),
        None => lines.clone(),
    });

    ExceptionInfo {
        kind: error.kind.clone(),
        message: error.message.clone(),
        trace,
    }
}

/// Same as [`exception_info`], rendered as a JSON value ready to be
/// placed in the output document.
pub fn exception_info_value(error: &ExceptionValue, config: &FormatterConfig) -> Value {
    serde_json::to_value(exception_info(error, config)).unwrap_or(Value::Null)
}
