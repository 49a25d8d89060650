//! Transport boundary between the appointment facade and the HTTP layer.
//!
//! The facade only needs three verbs over an already-configured base URL and
//! authorization. `HttpTransport` is the production implementation;
//! `MockTransport` records calls and replays a scripted reply.

pub mod http;
pub mod mock;

pub use http::*;
pub use mock::*;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Appointments API is not reachable at {0}")]
    Connection(String),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("Appointments API returned error (status {status}): {body}")]
    Status { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Response body is not valid JSON: {0}")]
    Decode(String),
}

/// HTTP verbs the appointments API exposes, relative to a configured base URL.
///
/// `path` includes any query string. An empty success body reads as
/// `Value::Null` for `get`/`post` and as `None` for `delete`.
#[async_trait]
pub trait AppointmentTransport: Send + Sync {
    async fn get(&self, path: &str) -> Result<Value, TransportError>;

    async fn post(&self, path: &str, body: &Value) -> Result<Value, TransportError>;

    async fn delete(&self, path: &str) -> Result<Option<Value>, TransportError>;
}
