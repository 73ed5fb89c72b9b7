use crate::value::TagValue;
use chrono::{DateTime, Utc};
use std::fmt;

/// Severity of a log entry, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl Severity {
    /// Human-readable label used for the `status` field.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }

    /// Numeric level, mirroring the label ordering.
    pub fn level(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<tracing::Level> for Severity {
    fn from(level: tracing::Level) -> Self {
        use tracing::Level;
        if level == Level::TRACE {
            Severity::Trace
        } else if level == Level::DEBUG {
            Severity::Debug
        } else if level == Level::INFO {
            Severity::Info
        } else if level == Level::WARN {
            Severity::Warn
        } else {
            Severity::Error
        }
    }
}

/// One structured log entry as consumed by the mapper.
///
/// `tags` preserves insertion order; tag processing and nested-key
/// merging depend on it.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub time: DateTime<Utc>,
    pub severity: Severity,
    pub message: TagValue,
    pub program_name: Option<String>,
    pub thread_name: Option<String>,
    pub pid: Option<u32>,
    pub tags: Vec<(String, TagValue)>,
}

impl LogEntry {
    pub fn new(severity: Severity, message: impl Into<TagValue>) -> Self {
        LogEntry {
            time: Utc::now(),
            severity,
            message: message.into(),
            program_name: None,
            thread_name: None,
            pid: None,
            tags: Vec::new(),
        }
    }

    pub fn at(mut self, time: DateTime<Utc>) -> Self {
        self.time = time;
        self
    }

    pub fn program(mut self, name: impl Into<String>) -> Self {
        self.program_name = Some(name.into());
        self
    }

    pub fn thread(mut self, name: impl Into<String>) -> Self {
        self.thread_name = Some(name.into());
        self
    }

    pub fn pid(mut self, pid: u32) -> Self {
        self.pid = Some(pid);
        self
    }

    /// Append a tag. Repeated keys are kept; later entries win during
    /// formatting.
    pub fn tag(mut self, key: impl Into<String>, value: impl Into<TagValue>) -> Self {
        self.tags.push((key.into(), value.into()));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_labels_and_ordering() {
        assert_eq!(Severity::Info.label(), "INFO");
        assert_eq!(Severity::Fatal.label(), "FATAL");
        assert!(Severity::Warn > Severity::Info);
        assert_eq!(Severity::Trace.level(), 0);
        assert_eq!(Severity::Fatal.level(), 5);
    }

    #[test]
    fn test_severity_from_tracing_level() {
        assert_eq!(Severity::from(tracing::Level::DEBUG), Severity::Debug);
        assert_eq!(Severity::from(tracing::Level::ERROR), Severity::Error);
    }

    #[test]
    fn test_builder_preserves_tag_order() {
        let entry = LogEntry::new(Severity::Info, "hello")
            .tag("b", 1i64)
            .tag("a", 2i64);
        let keys: Vec<&str> = entry.tags.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["b", "a"]);
    }
}
