use datadog_log_sink::config::FormatterConfig;
use datadog_log_sink::device::DataDogDevice;
use datadog_log_sink::entry::{LogEntry, Severity};
use datadog_log_sink::layer::DataDogLayer;
use datadog_log_sink::memory::MemorySink;
use datadog_log_sink::value::ExceptionValue;
use serde_json::json;
use std::sync::Arc;
use tokio::time::{sleep, Duration};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Registry;

#[tokio::test]
async fn test_device_formats_and_emits_one_document_per_entry() {
    let sink = Arc::new(MemorySink::new());
    let device = DataDogDevice::new(sink.clone());

    device
        .write(&LogEntry::new(Severity::Info, "first").tag("foo", "bar"))
        .await
        .unwrap();
    device
        .write(&LogEntry::new(Severity::Error, "second"))
        .await
        .unwrap();

    let documents = sink.documents().await;
    assert_eq!(documents.len(), 2);
    assert_eq!(documents[0]["message"], json!("first"));
    assert_eq!(documents[0]["foo"], json!("bar"));
    assert_eq!(documents[1]["status"], json!("ERROR"));
}

#[tokio::test]
async fn test_settings_can_change_between_entries() {
    let sink = Arc::new(MemorySink::new());
    let mut device = DataDogDevice::new(sink.clone());

    device
        .write(&LogEntry::new(Severity::Info, "a long message"))
        .await
        .unwrap();

    device.set_max_message_length(Some(6));
    device
        .write(&LogEntry::new(Severity::Info, "a long message"))
        .await
        .unwrap();

    device.set_max_message_length(None);
    device
        .write(&LogEntry::new(Severity::Info, "a long message"))
        .await
        .unwrap();

    let documents = sink.documents().await;
    assert_eq!(documents[0]["message"], json!("a long message"));
    assert_eq!(documents[1]["message"], json!("a long"));
    assert_eq!(documents[2]["message"], json!("a long message"));
}

#[tokio::test]
async fn test_backtrace_cleaner_can_be_installed_at_runtime() {
    let sink = Arc::new(MemorySink::new());
    let mut device = DataDogDevice::new(sink.clone());
    device.set_backtrace_cleaner(Some(Arc::new(|_| vec!["scrubbed".to_string()])));

    let error = ExceptionValue::new("RuntimeError")
        .with_message("boom")
        .with_backtrace(vec!["secret.rs:1".to_string()]);
    device
        .write(&LogEntry::new(Severity::Error, "failed").tag("error", error))
        .await
        .unwrap();

    let documents = sink.documents().await;
    assert_eq!(documents[0]["error"]["trace"], json!(["scrubbed"]));
}

#[tokio::test]
async fn test_document_key_order_follows_the_field_table() {
    let sink = Arc::new(MemorySink::new());
    let device = DataDogDevice::with_config(sink.clone(), FormatterConfig::default());

    let entry = LogEntry::new(Severity::Info, "m")
        .program("svc")
        .pid(1)
        .tag("zeta", 1)
        .tag("alpha", 2);
    device.write(&entry).await.unwrap();

    let documents = sink.documents().await;
    let keys: Vec<&str> = documents[0].keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        ["timestamp", "status", "logger", "pid", "message", "zeta", "alpha"]
    );
}

#[tokio::test]
async fn test_layer_routes_tracing_events_through_the_device() {
    let sink = Arc::new(MemorySink::new());
    let device = DataDogDevice::new(sink.clone());
    let (layer, _handle) = DataDogLayer::new(device, 64);
    let subscriber = Registry::default().with(layer);

    tracing::subscriber::with_default(subscriber, || {
        tracing::info!(user = "alice", "http.status_code" = 200i64, "logged in");
    });

    // Give the background task time to drain the channel.
    sleep(Duration::from_millis(200)).await;

    let documents = sink.documents().await;
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0]["message"], json!("logged in"));
    assert_eq!(documents[0]["status"], json!("INFO"));
    assert_eq!(documents[0]["user"], json!("alice"));
    assert_eq!(documents[0]["http"], json!({"status_code": 200}));
}

#[tokio::test]
async fn test_layer_counts_dropped_entries_instead_of_blocking() {
    let sink = Arc::new(MemorySink::new());
    let device = DataDogDevice::new(sink.clone());
    // Minimum channel size is 16; flood well past it before the
    // background task gets a chance to run.
    let (layer, _handle) = DataDogLayer::new(device, 1);
    let total = Arc::clone(&layer.total_events);
    let dropped = Arc::clone(&layer.dropped_events);
    let subscriber = Registry::default().with(layer);

    tracing::subscriber::with_default(subscriber, || {
        for i in 0..10_000u32 {
            tracing::info!(iteration = i, "flood");
        }
    });

    use std::sync::atomic::Ordering;
    assert_eq!(total.load(Ordering::Relaxed), 10_000);
    assert!(dropped.load(Ordering::Relaxed) > 0);
}
