use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{ApiError, BackendConfig};

#[derive(Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

/// Success body of the chat endpoint. `content` may be absent or empty;
/// the exchange manager substitutes a fallback in that case.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub content: Option<String>,
}

/// Asks the assistant one question. A single plain request/response; no
/// retries, no cancellation, no streaming.
pub async fn ask(config: &BackendConfig, message: &str) -> Result<ChatReply, ApiError> {
    let client = Client::new();
    let resp = client
        .post(format!("{}/chat", config.base_url))
        .header("Content-Type", "application/json")
        .json(&ChatRequest { message })
        .send()
        .await?;

    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        return Err(ApiError::Status { status, body });
    }

    Ok(resp.json().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_reply_tolerates_an_empty_body() {
        let reply: ChatReply = serde_json::from_str("{}").unwrap();
        assert_eq!(reply.content, None);
    }

    #[test]
    fn chat_reply_parses_content() {
        let reply: ChatReply = serde_json::from_str(r#"{"content":"Coverage includes..."}"#).unwrap();
        assert_eq!(reply.content.as_deref(), Some("Coverage includes..."));
    }
}
