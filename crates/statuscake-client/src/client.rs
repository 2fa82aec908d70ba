//! HTTP client for the StatusCake API.
//!
//! Provides the three SSL test operations behind [`SslApi`], with the
//! account credentials attached to every request.

use crate::api::SslApi;
use crate::form::encode_form;
use crate::types::{PartialSsl, Ssl, UpdateResponse};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Default API root.
pub const DEFAULT_BASE_URL: &str = "https://app.statuscake.com/API";

/// Maximum number of response body characters written to the log.
const MAX_LOG_BODY_LENGTH: usize = 200;

/// StatusCake client configuration.
#[derive(Debug, Clone)]
pub struct StatusCakeClientConfig {
    /// API root (e.g., <https://app.statuscake.com/API>)
    pub base_url: String,
    /// Account user name, sent as the `Username` header
    pub username: String,
    /// Account API key, sent as the `API` header
    pub api_key: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for StatusCakeClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            username: String::new(),
            api_key: String::new(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// HTTP client for StatusCake SSL test operations.
#[derive(Debug, Clone)]
pub struct StatusCakeClient {
    client: Client,
    base_url: String,
    username: String,
    api_key: String,
}

impl StatusCakeClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is not an absolute http(s) URL or the
    /// HTTP client cannot be created.
    pub fn new(config: StatusCakeClientConfig) -> Result<Self, ClientError> {
        let parsed = Url::parse(&config.base_url)
            .map_err(|e| ClientError::Init(format!("invalid base URL {}: {e}", config.base_url)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::Init(format!(
                "unsupported URL scheme {:?}",
                parsed.scheme()
            )));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("statuscake-ssltest/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClientError::Init(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            username: config.username,
            api_key: config.api_key,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("Username", &self.username)
            .header("API", &self.api_key)
    }

    /// Send a request and decode the JSON body.
    async fn send(&self, request: RequestBuilder) -> Result<Value, ClientError> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| ClientError::Request(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Request(e.to_string()))?;

        tracing::debug!(status = status.as_u16(), body = %truncate_for_log(&body), "response");

        if !status.is_success() {
            return Err(ClientError::ApiError {
                status: status.as_u16(),
                message: truncate_for_log(&body),
            });
        }

        let value: Value =
            serde_json::from_str(&body).map_err(|e| ClientError::Parse(e.to_string()))?;

        // Authentication and quota failures come back as 200 with an error object
        if let Some(message) = value.get("Error").and_then(Value::as_str) {
            return Err(ClientError::ApiError {
                status: status.as_u16(),
                message: message.to_string(),
            });
        }

        Ok(value)
    }

    /// List every SSL test on the account.
    ///
    /// # Errors
    ///
    /// Returns error on network or API errors.
    pub async fn list(&self) -> Result<Vec<Ssl>, ClientError> {
        let url = self.url("SSL");
        tracing::debug!(url, "GET SSL tests");

        let value = self.send(self.client.get(&url)).await?;
        serde_json::from_value(value).map_err(|e| ClientError::Parse(e.to_string()))
    }
}

#[async_trait]
impl SslApi for StatusCakeClient {
    async fn upsert(&self, test: &PartialSsl) -> Result<u64, ClientError> {
        let url = self.url("SSL/Update");
        tracing::debug!(url, id = ?test.id, "PUT SSL test");

        let form = encode_form(test);
        let value = self.send(self.client.put(&url).form(&form)).await?;
        let response: UpdateResponse =
            serde_json::from_value(value).map_err(|e| ClientError::Parse(e.to_string()))?;

        if !response.success {
            return Err(ClientError::Rejected(response.message_text()));
        }

        match test.id {
            Some(id) => Ok(id),
            None => response.message_id().ok_or_else(|| {
                ClientError::Parse(format!(
                    "create response carried no test id: {}",
                    response.message_text()
                ))
            }),
        }
    }

    async fn detail(&self, id: u64) -> Result<Ssl, ClientError> {
        // Only a successful listing that lacks the id means the test is gone
        let tests = self.list().await?;

        tests
            .into_iter()
            .find(|t| t.id == id)
            .ok_or(ClientError::NotFound(id))
    }

    async fn delete(&self, id: u64) -> Result<(), ClientError> {
        let url = self.url("SSL/Update");
        tracing::debug!(url, id, "DELETE SSL test");

        let request = self.client.delete(&url).query(&[("id", id)]);
        let value = self.send(request).await?;

        let response: UpdateResponse =
            serde_json::from_value(value).map_err(|e| ClientError::Parse(e.to_string()))?;
        if response.success {
            Ok(())
        } else {
            Err(ClientError::Rejected(response.message_text()))
        }
    }
}

/// Truncate a body for logging, counting characters rather than bytes.
fn truncate_for_log(body: &str) -> String {
    let mut chars = body.chars();
    let head: String = chars.by_ref().take(MAX_LOG_BODY_LENGTH).collect();
    if chars.next().is_some() {
        format!("{head}... [truncated, {} bytes total]", body.len())
    } else {
        head
    }
}

/// Errors that can occur with the StatusCake client.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ClientError {
    /// Client initialization failed
    #[error("client init error: {0}")]
    Init(String),
    /// HTTP request failed
    #[error("request error: {0}")]
    Request(String),
    /// API returned an error status or error object
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from API
        message: String,
    },
    /// No test with this identifier exists
    #[error("SSL test {0} not found")]
    NotFound(u64),
    /// The API answered `Success: false`
    #[error("request rejected: {0}")]
    Rejected(String),
    /// Response parsing failed
    #[error("parse error: {0}")]
    Parse(String),
}

impl ClientError {
    /// Whether the remote resource does not exist.
    ///
    /// Only [`ClientError::NotFound`] qualifies. An HTTP 404 usually means a
    /// wrong endpoint and says nothing about the test.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
