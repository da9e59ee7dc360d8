use std::path::Path;

use reqwest::multipart;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{backend_error, ApiError, BackendConfig};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentInfo {
    pub id: i64,
    pub file_name: String,
    /// One of `indexing`, `ready` or `error`.
    pub status: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentList {
    pub documents: Vec<DocumentInfo>,
    pub total: i64,
    pub page: i64,
    pub size: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadReceipt {
    pub message: String,
    pub document_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub session_id: String,
    pub role: String,
    pub content: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatHistory {
    pub messages: Vec<HistoryEntry>,
    pub total: i64,
    pub page: i64,
    pub size: i64,
}

fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

pub async fn list_documents(
    config: &BackendConfig,
    token: &str,
    page: Option<u32>,
    size: Option<u32>,
) -> Result<DocumentList, ApiError> {
    let client = Client::new();
    let mut req = client
        .get(format!("{}/admin/documents", config.base_url))
        .header("Authorization", bearer(token));
    if let Some(page) = page {
        req = req.query(&[("page", page)]);
    }
    if let Some(size) = size {
        req = req.query(&[("size", size)]);
    }

    let resp = req.send().await?;
    if !resp.status().is_success() {
        return Err(backend_error(resp).await);
    }
    Ok(resp.json().await?)
}

/// Uploads one source document as a multipart `file` field. Indexing
/// happens server side; the receipt only confirms the handoff.
pub async fn upload_document(
    config: &BackendConfig,
    token: &str,
    path: &Path,
) -> Result<UploadReceipt, ApiError> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("document.pdf")
        .to_string();
    let bytes = std::fs::read(path)?;

    let part = multipart::Part::bytes(bytes)
        .file_name(file_name)
        .mime_str("application/pdf")?;
    let form = multipart::Form::new().part("file", part);

    let client = Client::new();
    let resp = client
        .post(format!("{}/admin/documents/upload", config.base_url))
        .header("Authorization", bearer(token))
        .multipart(form)
        .send()
        .await?;

    if !resp.status().is_success() {
        return Err(backend_error(resp).await);
    }
    Ok(resp.json().await?)
}

pub async fn delete_document(
    config: &BackendConfig,
    token: &str,
    id: i64,
) -> Result<(), ApiError> {
    let client = Client::new();
    let resp = client
        .delete(format!("{}/admin/documents/{}", config.base_url, id))
        .header("Authorization", bearer(token))
        .send()
        .await?;

    if !resp.status().is_success() {
        return Err(backend_error(resp).await);
    }
    Ok(())
}

pub async fn chat_history(
    config: &BackendConfig,
    token: &str,
    page: Option<u32>,
    size: Option<u32>,
) -> Result<ChatHistory, ApiError> {
    let client = Client::new();
    let mut req = client
        .get(format!("{}/admin/chat-history", config.base_url))
        .header("Authorization", bearer(token));
    if let Some(page) = page {
        req = req.query(&[("page", page)]);
    }
    if let Some(size) = size {
        req = req.query(&[("size", size)]);
    }

    let resp = req.send().await?;
    if !resp.status().is_success() {
        return Err(backend_error(resp).await);
    }
    Ok(resp.json().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_list_parses_the_backend_shape() {
        let json = r#"{
            "documents": [
                {"id": 3, "file_name": "policy.pdf", "status": "ready", "created_at": "2025-06-01T09:30:00"}
            ],
            "total": 1, "page": 1, "size": 10
        }"#;
        let list: DocumentList = serde_json::from_str(json).unwrap();
        assert_eq!(list.documents.len(), 1);
        assert_eq!(list.documents[0].file_name, "policy.pdf");
        assert_eq!(list.documents[0].status, "ready");
    }

    #[test]
    fn chat_history_parses_the_backend_shape() {
        let json = r#"{
            "messages": [
                {"id": 1, "session_id": "abc-123", "role": "user", "content": "hi", "created_at": "2025-06-01T09:30:00"}
            ],
            "total": 1, "page": 1, "size": 10
        }"#;
        let history: ChatHistory = serde_json::from_str(json).unwrap();
        assert_eq!(history.messages[0].session_id, "abc-123");
        assert_eq!(history.messages[0].role, "user");
    }
}
