use crate::config::{BacktraceCleaner, FormatterConfig};
use crate::entry::LogEntry;
use crate::mapper;
use crate::sink::{JsonSink, SinkError};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Log device that formats entries into the Datadog log collection
/// schema and forwards the resulting documents to a [`JsonSink`].
///
/// See https://docs.datadoghq.com/logs/log_collection
///
/// The device owns the [`FormatterConfig`]; both settings can be
/// changed between entries and take effect on the next one.
pub struct DataDogDevice {
    config: FormatterConfig,
    sink: Arc<dyn JsonSink>,
}

impl DataDogDevice {
    pub fn new(sink: Arc<dyn JsonSink>) -> Self {
        DataDogDevice::with_config(sink, FormatterConfig::default())
    }

    pub fn with_config(sink: Arc<dyn JsonSink>, config: FormatterConfig) -> Self {
        DataDogDevice { config, sink }
    }

    pub fn config(&self) -> &FormatterConfig {
        &self.config
    }

    /// Change the message-truncation limit for subsequent entries.
    /// `None` means unlimited.
    pub fn set_max_message_length(&mut self, limit: Option<usize>) {
        self.config.max_message_length = limit;
    }

    /// Install or remove the backtrace cleaner applied to captured
    /// error traces.
    pub fn set_backtrace_cleaner(&mut self, cleaner: Option<BacktraceCleaner>) {
        self.config.backtrace_cleaner = cleaner;
    }

    /// Pure transformation of one entry into its output document.
    pub fn format(&self, entry: &LogEntry) -> Map<String, Value> {
        mapper::entry_as_document(entry, &self.config)
    }

    /// Format one entry and emit the document to the sink.
    pub async fn write(&self, entry: &LogEntry) -> Result<(), SinkError> {
        let document = self.format(entry);
        self.sink.emit(&document).await
    }

    pub async fn flush(&self) -> Result<(), SinkError> {
        self.sink.flush().await
    }
}
