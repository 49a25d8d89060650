use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::Value;

use super::{AppointmentTransport, TransportError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallMethod {
    Get,
    Post,
    Delete,
}

/// One request seen by `MockTransport`.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: CallMethod,
    pub path: String,
    pub body: Option<Value>,
}

/// Mock transport for testing. Answers every call with the same reply and
/// records what was asked.
pub struct MockTransport {
    reply: Result<Option<Value>, TransportError>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockTransport {
    /// Every call succeeds with `body`.
    pub fn responding(body: Value) -> Self {
        Self::with_reply(Ok(Some(body)))
    }

    /// Every call succeeds with an empty body (HTTP 204).
    pub fn empty() -> Self {
        Self::with_reply(Ok(None))
    }

    /// Every call fails with `error`.
    pub fn failing(error: TransportError) -> Self {
        Self::with_reply(Err(error))
    }

    fn with_reply(reply: Result<Option<Value>, TransportError>) -> Self {
        Self {
            reply,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of recorded calls, oldest first.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock_calls().clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock_calls().len()
    }

    fn lock_calls(&self) -> MutexGuard<'_, Vec<RecordedCall>> {
        self.calls.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(
        &self,
        method: CallMethod,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Option<Value>, TransportError> {
        self.lock_calls().push(RecordedCall {
            method,
            path: path.to_string(),
            body: body.cloned(),
        });
        self.reply.clone()
    }
}

#[async_trait]
impl AppointmentTransport for MockTransport {
    async fn get(&self, path: &str) -> Result<Value, TransportError> {
        Ok(self.record(CallMethod::Get, path, None)?.unwrap_or(Value::Null))
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, TransportError> {
        Ok(self
            .record(CallMethod::Post, path, Some(body))?
            .unwrap_or(Value::Null))
    }

    async fn delete(&self, path: &str) -> Result<Option<Value>, TransportError> {
        self.record(CallMethod::Delete, path, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn mock_returns_configured_body() {
        let mock = MockTransport::responding(json!([1, 2]));
        assert_eq!(mock.get("/x").await.unwrap(), json!([1, 2]));
        assert_eq!(mock.delete("/x").await.unwrap(), Some(json!([1, 2])));
    }

    #[tokio::test]
    async fn empty_mock_reads_as_null_or_none() {
        let mock = MockTransport::empty();
        assert_eq!(mock.get("/x").await.unwrap(), Value::Null);
        assert_eq!(mock.delete("/x").await.unwrap(), None);
    }

    #[tokio::test]
    async fn failing_mock_returns_error() {
        let mock = MockTransport::failing(TransportError::Timeout(5));
        assert_eq!(
            mock.post("/x", &json!({})).await.unwrap_err(),
            TransportError::Timeout(5)
        );
    }

    #[tokio::test]
    async fn mock_records_calls_in_order() {
        let mock = MockTransport::empty();
        mock.get("/a").await.unwrap();
        mock.post("/b", &json!({ "k": 1 })).await.unwrap();
        mock.delete("/c").await.unwrap();

        let calls = mock.calls();
        assert_eq!(mock.call_count(), 3);
        assert_eq!(calls[0].method, CallMethod::Get);
        assert_eq!(calls[1].body, Some(json!({ "k": 1 })));
        assert_eq!(calls[2].path, "/c");
    }
}
