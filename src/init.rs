use crate::device::DataDogDevice;
use crate::layer::DataDogLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Registry;

/// Configuration for the tracing front-end.
///
/// **Fields**
/// - `channel_buffer`: maximum number of [`crate::entry::LogEntry`]s
///   queued for the background task before new entries are dropped.
/// - `enable_stdout`: if `true`, a `tracing_subscriber::fmt` layer is
///   stacked on top so events are also printed to the console.
#[derive(Clone, Debug)]
pub struct LayerConfig {
    pub channel_buffer: usize,
    pub enable_stdout: bool,
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            channel_buffer: 1024,
            enable_stdout: true,
        }
    }
}

/// Install a global `tracing` subscriber that routes every event
/// through the given device.
///
/// **Parameters**
/// - `device`: [`DataDogDevice`] that formats entries and owns the
///   sink the documents are written to.
/// - `config`: [`LayerConfig`] controlling the queue size and console
///   echo.
///
/// **Effects**
///
/// This installs a [`Registry`] combined with [`DataDogLayer`] as the
/// global default subscriber, so all `tracing` events in the process
/// are observed by the layer.
pub fn init_tracing_with_config(device: DataDogDevice, config: LayerConfig) {
    let (layer, _handle) = DataDogLayer::new(device, config.channel_buffer);

    if config.enable_stdout {
        let fmt_layer = tracing_subscriber::fmt::layer();
        let subscriber = Registry::default().with(layer).with(fmt_layer);
        tracing::subscriber::set_global_default(subscriber).expect("set global subscriber");
    } else {
        let subscriber = Registry::default().with(layer);
        tracing::subscriber::set_global_default(subscriber).expect("set global subscriber");
    }
}

/// Initialize tracing with sensible defaults.
///
/// Equivalent to calling [`init_tracing_with_config`] with
/// [`LayerConfig::default`].
pub fn init_tracing(device: DataDogDevice) {
    init_tracing_with_config(device, LayerConfig::default());
}
