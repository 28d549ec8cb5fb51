//! The seam between the core and the HTTP API.

use async_trait::async_trait;

use crate::error::ApiError;

/// HTTP method of a mutating request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// Status and decoded body of a completed request.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteResponse {
    pub status: u16,
    pub data: serde_json::Value,
}

impl RemoteResponse {
    pub fn new(status: u16, data: serde_json::Value) -> Self {
        Self { status, data }
    }

    /// The API reports success with exactly 200.
    pub fn is_success(&self) -> bool {
        self.status == 200
    }

    /// Human-readable message carried by the body, if any.
    pub fn message(&self) -> Option<&str> {
        self.data.get("message").and_then(serde_json::Value::as_str)
    }

    /// Turns a non-200 response into [`ApiError::Http`].
    pub fn into_result(self) -> Result<serde_json::Value, ApiError> {
        if self.is_success() {
            Ok(self.data)
        } else {
            let message = self
                .message()
                .map(str::to_string)
                .unwrap_or_else(|| format!("request failed with status {}", self.status));
            Err(ApiError::http(self.status, message))
        }
    }
}

/// Anything that can serve collection reads and mutations.
///
/// [`ConsoleClient`](crate::ConsoleClient) implements this over HTTP; tests
/// and demos substitute in-memory fakes.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Fetches a URL and returns the decoded body of a 200 response.
    async fn fetch(&self, url: &str) -> Result<serde_json::Value, ApiError>;

    /// Sends a request. Non-200 statuses come back as `Ok` so callers can
    /// read the body; only transport failures are `Err`.
    async fn request(
        &self,
        method: Method,
        url: &str,
        body: Option<serde_json::Value>,
    ) -> Result<RemoteResponse, ApiError>;
}
