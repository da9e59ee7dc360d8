mod api;
mod chat;
mod commands;
mod session;

use commands::chat::ChatState;
use session::SessionStore;
use tauri::Manager;
use tracing_subscriber::EnvFilter;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .setup(|app| {
            let app_dir = app.path().app_data_dir()?;
            let store =
                SessionStore::new(&app_dir).expect("Failed to initialize session store");
            app.manage(store);
            app.manage(ChatState::new());
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::chat::submit_message,
            commands::chat::start_new_conversation,
            commands::chat::select_conversation,
            commands::chat::list_conversations,
            commands::admin::admin_login,
            commands::admin::admin_logout,
            commands::admin::admin_session_active,
            commands::admin::admin_init,
            commands::admin::admin_list_documents,
            commands::admin::admin_upload_document,
            commands::admin::admin_delete_document,
            commands::admin::admin_chat_history,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
