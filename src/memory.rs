use crate::sink::{JsonSink, SinkError};
use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::Mutex;

/// Sink that captures emitted documents in memory.
///
/// Intended for tests and local inspection; documents are stored in
/// emission order.
#[derive(Default)]
pub struct MemorySink {
    documents: Mutex<Vec<Map<String, Value>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        MemorySink::default()
    }

    /// Snapshot of everything emitted so far.
    pub async fn documents(&self) -> Vec<Map<String, Value>> {
        self.documents.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.documents.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.lock().await.is_empty()
    }
}

#[async_trait]
impl JsonSink for MemorySink {
    async fn emit(&self, document: &Map<String, Value>) -> Result<(), SinkError> {
        self.documents.lock().await.push(document.clone());
        Ok(())
    }
}
