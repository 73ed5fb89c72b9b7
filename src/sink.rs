use async_trait::async_trait;
use serde_json::{Map, Value};

/// Error surfaced by a [`JsonSink`] while emitting a document.
///
/// The transformation itself is total and never fails; only the sink
/// surface can report problems.
#[derive(thiserror::Error, Debug)]
pub enum SinkError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("{0}")]
    Backend(String),
}

/// Destination for the JSON documents produced by the device.
///
/// Implementations are responsible for rendering the document to text
/// and delivering it (a stream, a buffer, stdout, etc). One document is
/// emitted per log entry; its key order is meaningful and must be
/// preserved by the serializer.
#[async_trait]
pub trait JsonSink: Send + Sync {
    /// Emit a single document.
    ///
    /// **Returns**
    /// - `Ok(())` if the document was accepted.
    /// - `Err(..)` if the sink failed to render or deliver it.
    async fn emit(&self, document: &Map<String, Value>) -> Result<(), SinkError>;

    /// Flush any buffered documents, if the sink buffers.
    ///
    /// Default implementation is a no-op.
    async fn flush(&self) -> Result<(), SinkError> {
        Ok(())
    }
}
