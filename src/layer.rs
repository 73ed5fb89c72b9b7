use crate::device::DataDogDevice;
use crate::entry::{LogEntry, Severity};
use crate::value::TagValue;
use chrono::Utc;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

/// `tracing_subscriber` layer that turns events into [`LogEntry`]s and
/// forwards them to a [`DataDogDevice`] via a bounded channel and a
/// background task.
///
/// Events at every level are captured; level filtering is left to the
/// subscriber stack. Sink I/O is fully decoupled from application
/// threads: when the channel is full the entry is dropped, never
/// blocked on.
pub struct DataDogLayer {
    sender: mpsc::Sender<LogEntry>,
    /// Total events seen by the layer.
    pub total_events: Arc<AtomicU64>,
    /// Successfully handed to the background task.
    pub enqueued_events: Arc<AtomicU64>,
    /// Dropped because the channel was full.
    pub dropped_events: Arc<AtomicU64>,
}

impl DataDogLayer {
    /// Create a new layer and spawn a background task that drains
    /// entries from a bounded channel into the provided device.
    ///
    /// A minimal `buffer` threshold is enforced to avoid degenerate
    /// configurations.
    pub fn new(device: DataDogDevice, buffer: usize) -> (Self, JoinHandle<()>) {
        let buffer = buffer.max(16);
        let (tx, mut rx) = mpsc::channel::<LogEntry>(buffer);

        let total_events = Arc::new(AtomicU64::new(0));
        let enqueued_events = Arc::new(AtomicU64::new(0));
        let dropped_events = Arc::new(AtomicU64::new(0));

        let enqueued_events_bg = Arc::clone(&enqueued_events);

        let handle = tokio::spawn(async move {
            while let Some(entry) = rx.recv().await {
                enqueued_events_bg.fetch_add(1, Ordering::Relaxed);
                if let Err(e) = device.write(&entry).await {
                    eprintln!("error writing log entry: {}", e);
                }
            }
        });

        (
            Self {
                sender: tx,
                total_events,
                enqueued_events,
                dropped_events,
            },
            handle,
        )
    }
}

impl<S> Layer<S> for DataDogLayer
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    fn on_event(&self, event: &Event, _ctx: Context<'_, S>) {
        self.total_events.fetch_add(1, Ordering::Relaxed);

        let mut tags = Vec::new();
        let mut message = TagValue::Null;

        let mut visitor = EntryVisitor {
            tags: &mut tags,
            message: &mut message,
        };
        event.record(&mut visitor);

        let meta = event.metadata();
        let entry = LogEntry {
            time: Utc::now(),
            severity: Severity::from(*meta.level()),
            message,
            program_name: Some(meta.target().to_string()),
            thread_name: std::thread::current().name().map(|s| s.to_string()),
            pid: Some(std::process::id()),
            tags,
        };

        if self.sender.try_send(entry).is_err() {
            self.dropped_events.fetch_add(1, Ordering::Relaxed);
        }
    }
}

/// Visitor that splits event fields into the message value and the tag
/// list. Dot-notated field names are kept as-is; the tag formatter
/// expands them into nested objects later.
pub struct EntryVisitor<'a> {
    pub tags: &'a mut Vec<(String, TagValue)>,
    pub message: &'a mut TagValue,
}

impl EntryVisitor<'_> {
    fn record(&mut self, field: &Field, value: TagValue) {
        if field.name() == "message" {
            *self.message = value;
        } else {
            self.tags.push((field.name().to_string(), value));
        }
    }
}

impl Visit for EntryVisitor<'_> {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.record(field, TagValue::from(value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record(field, TagValue::Int(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.record(field, TagValue::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.record(field, TagValue::Float(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.record(field, TagValue::Bool(value));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.record(field, TagValue::Str(format!("{:?}", value)));
    }
}
