use crate::sink::{JsonSink, SinkError};
use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;

/// Sink that renders each document as one line of JSON and writes it
/// to an async stream (newline-delimited JSON).
pub struct WriterSink<W> {
    writer: Mutex<W>,
}

impl<W: AsyncWrite + Unpin + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        WriterSink {
            writer: Mutex::new(writer),
        }
    }

    /// Consume the sink and return the underlying stream.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

#[async_trait]
impl<W: AsyncWrite + Unpin + Send> JsonSink for WriterSink<W> {
    async fn emit(&self, document: &Map<String, Value>) -> Result<(), SinkError> {
        let mut line = serde_json::to_vec(document)?;
        line.push(b'\n');
        let mut writer = self.writer.lock().await;
        writer.write_all(&line).await?;
        Ok(())
    }

    async fn flush(&self) -> Result<(), SinkError> {
        self.writer.lock().await.flush().await?;
        Ok(())
    }
}
