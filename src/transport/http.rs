use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde_json::Value;

use super::{AppointmentTransport, TransportError};
use crate::config::ClientConfig;

/// `reqwest`-backed transport for the appointments API.
///
/// Owns connection setup: base URL, bearer token, request timeout.
pub struct HttpTransport {
    base_url: String,
    token: Option<String>,
    client: reqwest::Client,
    timeout_secs: u64,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TransportError::HttpClient(e.to_string()))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            client,
            timeout_secs: config.timeout_secs,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, TransportError> {
        let response = builder.send().await.map_err(|e| {
            if e.is_connect() {
                TransportError::Connection(self.base_url.clone())
            } else if e.is_timeout() {
                TransportError::Timeout(self.timeout_secs)
            } else {
                TransportError::HttpClient(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// `None` for 204 or a blank body.
    async fn read_json(&self, response: Response) -> Result<Option<Value>, TransportError> {
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let bytes = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout(self.timeout_secs)
            } else {
                TransportError::HttpClient(e.to_string())
            }
        })?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| TransportError::Decode(e.to_string()))
    }
}

#[async_trait]
impl AppointmentTransport for HttpTransport {
    async fn get(&self, path: &str) -> Result<Value, TransportError> {
        let response = self.send(self.request(Method::GET, path)).await?;
        Ok(self.read_json(response).await?.unwrap_or(Value::Null))
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, TransportError> {
        let response = self
            .send(self.request(Method::POST, path).json(body))
            .await?;
        Ok(self.read_json(response).await?.unwrap_or(Value::Null))
    }

    async fn delete(&self, path: &str) -> Result<Option<Value>, TransportError> {
        let response = self.send(self.request(Method::DELETE, path)).await?;
        self.read_json(response).await
    }
}
