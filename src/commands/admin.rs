use std::path::Path;

use tauri::State;

use crate::api::admin::{ChatHistory, DocumentList, UploadReceipt};
use crate::api::{self, ApiError};
use crate::session::SessionStore;

const LOGIN_REQUIRED: &str = "Admin session expired. Please sign in again.";

/// Backend `detail` verbatim when present, otherwise the per-operation
/// fallback.
fn surface(error: ApiError, fallback: &str) -> String {
    match error {
        ApiError::Backend {
            detail: Some(detail),
            ..
        } => detail,
        _ => fallback.to_string(),
    }
}

fn require_token(session: &SessionStore) -> Result<String, String> {
    session
        .access_token()
        .map_err(|e| e.to_string())?
        .ok_or_else(|| LOGIN_REQUIRED.to_string())
}

/// The backend only indexes PDFs; reject anything else before touching the
/// network. This mirrors the file picker filter and is not a security
/// boundary.
fn is_pdf_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

#[tauri::command]
pub async fn admin_login(
    session: State<'_, SessionStore>,
    username: String,
    password: String,
) -> Result<(), String> {
    let config = session.backend_config();
    let token = api::auth::login(&config, &username, &password)
        .await
        .map_err(|e| surface(e, "Login failed. Check your username and password."))?;
    session
        .store_access_token(&token.access_token)
        .map_err(|e| e.to_string())?;
    tracing::info!("admin signed in");
    Ok(())
}

#[tauri::command]
pub fn admin_logout(session: State<'_, SessionStore>) -> Result<(), String> {
    session.clear_access_token().map_err(|e| e.to_string())
}

#[tauri::command]
pub fn admin_session_active(session: State<'_, SessionStore>) -> Result<bool, String> {
    Ok(session.access_token().map_err(|e| e.to_string())?.is_some())
}

/// Development bootstrap for a fresh backend without an admin account.
#[tauri::command]
pub async fn admin_init(session: State<'_, SessionStore>) -> Result<String, String> {
    let config = session.backend_config();
    api::auth::init_admin(&config)
        .await
        .map_err(|e| surface(e, "Could not initialize the admin account."))
}

#[tauri::command]
pub async fn admin_list_documents(
    session: State<'_, SessionStore>,
    page: Option<u32>,
    size: Option<u32>,
) -> Result<DocumentList, String> {
    let config = session.backend_config();
    let token = require_token(&session)?;
    api::admin::list_documents(&config, &token, page, size)
        .await
        .map_err(|e| surface(e, "Failed to load the document list."))
}

#[tauri::command]
pub async fn admin_upload_document(
    session: State<'_, SessionStore>,
    file_path: String,
) -> Result<UploadReceipt, String> {
    let path = Path::new(&file_path);
    if !is_pdf_path(path) {
        return Err("Only PDF files can be uploaded.".to_string());
    }

    let config = session.backend_config();
    let token = require_token(&session)?;
    let receipt = api::admin::upload_document(&config, &token, path)
        .await
        .map_err(|e| surface(e, "Failed to upload the document."))?;
    tracing::info!(document_id = receipt.document_id, "document uploaded");
    Ok(receipt)
}

#[tauri::command]
pub async fn admin_delete_document(
    session: State<'_, SessionStore>,
    id: i64,
) -> Result<(), String> {
    let config = session.backend_config();
    let token = require_token(&session)?;
    api::admin::delete_document(&config, &token, id)
        .await
        .map_err(|e| surface(e, "Failed to delete the document."))
}

#[tauri::command]
pub async fn admin_chat_history(
    session: State<'_, SessionStore>,
    page: Option<u32>,
    size: Option<u32>,
) -> Result<ChatHistory, String> {
    let config = session.backend_config();
    let token = require_token(&session)?;
    api::admin::chat_history(&config, &token, page, size)
        .await
        .map_err(|e| surface(e, "Failed to load the chat history."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_prefers_the_backend_detail() {
        let error = ApiError::Backend {
            status: 400,
            detail: Some("Only PDF files are allowed".into()),
        };
        assert_eq!(
            surface(error, "Failed to upload the document."),
            "Only PDF files are allowed"
        );
    }

    #[test]
    fn surface_falls_back_when_detail_is_absent() {
        let error = ApiError::Backend {
            status: 502,
            detail: None,
        };
        assert_eq!(
            surface(error, "Failed to upload the document."),
            "Failed to upload the document."
        );
    }

    #[test]
    fn require_token_rejects_a_signed_out_session() {
        let session = SessionStore::in_memory();
        assert_eq!(require_token(&session), Err(LOGIN_REQUIRED.to_string()));

        session.store_access_token("jwt-token").unwrap();
        assert_eq!(require_token(&session), Ok("jwt-token".to_string()));
    }

    #[test]
    fn pdf_filter_checks_the_extension_only() {
        assert!(is_pdf_path(Path::new("/tmp/terms.pdf")));
        assert!(is_pdf_path(Path::new("/tmp/TERMS.PDF")));
        assert!(!is_pdf_path(Path::new("/tmp/terms.docx")));
        assert!(!is_pdf_path(Path::new("/tmp/no-extension")));
    }
}
