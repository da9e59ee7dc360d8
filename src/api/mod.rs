pub mod admin;
pub mod auth;
pub mod chat;

use serde::Deserialize;

/// Where the backend lives when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1";

/// Backend location. Every endpoint path hangs off `base_url`.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub base_url: String,
}

impl BackendConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("file error: {0}")]
    Io(#[from] std::io::Error),
    /// Non-2xx status from the chat endpoint; carries the raw body.
    #[error("API error: {status} - {body}")]
    Status { status: u16, body: String },
    /// Non-2xx status from an admin endpoint; carries the parsed `detail`
    /// field when the body had one.
    #[error("{}", .detail.as_deref().unwrap_or("the backend rejected the request"))]
    Backend { status: u16, detail: Option<String> },
}

impl serde::Serialize for ApiError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    detail: Option<String>,
}

/// Turns a failed admin/auth response into [`ApiError::Backend`], pulling
/// the `detail` field out of the `{ "detail": ... }` envelope the backend
/// uses for failures.
pub(crate) async fn backend_error(resp: reqwest::Response) -> ApiError {
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<ErrorEnvelope>(&body)
        .ok()
        .and_then(|envelope| envelope.detail);
    ApiError::Backend { status, detail }
}
