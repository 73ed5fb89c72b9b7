use std::sync::Arc;

use datadog_log_sink::config::FormatterConfig;
use datadog_log_sink::device::DataDogDevice;
use datadog_log_sink::entry::{LogEntry, Severity};
use datadog_log_sink::value::{ExceptionValue, TagValue};
use datadog_log_sink::writer::WriterSink;

#[tokio::main]
async fn main() {
    let sink = Arc::new(WriterSink::new(tokio::io::stdout()));
    let config = FormatterConfig::new().max_message_length(200);
    let device = DataDogDevice::with_config(sink, config);

    let entry = LogEntry::new(Severity::Info, "request finished")
        .program("demo")
        .pid(std::process::id())
        .tag("http.method", "GET")
        .tag("http.status_code", 200)
        .tag("duration_ms", 42);
    device.write(&entry).await.expect("write entry");

    let error = ExceptionValue::new("RuntimeError")
        .with_message("boom")
        .with_backtrace(vec!["app.rs:10".to_string(), "main.rs:3".to_string()]);
    let entry = LogEntry::new(Severity::Error, TagValue::Error(error)).program("demo");
    device.write(&entry).await.expect("write entry");

    device.flush().await.expect("flush");
}
