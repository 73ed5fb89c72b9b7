use crate::sink::{JsonSink, SinkError};
use async_trait::async_trait;
use serde_json::{Map, Value};

/// A sink that simply drops all documents.
///
/// Useful for measuring the overhead of the transformation itself
/// without any I/O, and for tests that don't care about output.
#[derive(Clone, Default)]
pub struct NoopSink;

#[async_trait]
impl JsonSink for NoopSink {
    async fn emit(&self, _document: &Map<String, Value>) -> Result<(), SinkError> {
        Ok(())
    }
}
