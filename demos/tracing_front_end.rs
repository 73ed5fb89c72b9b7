use std::sync::Arc;
use tokio::time::{sleep, Duration};
use tracing::{error, info};

use datadog_log_sink::device::DataDogDevice;
use datadog_log_sink::init::{init_tracing_with_config, LayerConfig};
use datadog_log_sink::writer::WriterSink;

#[tokio::main]
async fn main() {
    let sink = Arc::new(WriterSink::new(tokio::io::stdout()));
    let device = DataDogDevice::new(sink);

    let layer_config = LayerConfig {
        channel_buffer: 4096,
        enable_stdout: false,
    };
    init_tracing_with_config(device, layer_config);

    info!(user = "alice", "http.status_code" = 200i64, "logged in");
    error!(attempt = 3i64, "payment gateway timed out");

    // Give the background task a little time to drain the channel.
    sleep(Duration::from_millis(500)).await;
}
