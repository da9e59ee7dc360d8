use rusqlite::{params, Connection, Result};
use std::path::Path;
use std::sync::Mutex;

use crate::api::{BackendConfig, DEFAULT_BASE_URL};

/// Storage key for the admin bearer token. The token is obtained from the
/// backend login endpoint and attached to every admin call; when the key is
/// absent the UI falls back to the login screen.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

const BACKEND_BASE_URL_KEY: &str = "backend_base_url";

/// Persistent key-value store for credentials and client configuration.
///
/// Conversations deliberately do not live here. Only the admin session
/// token and settings survive a restart; the chat state is in memory and
/// discarded with the window.
pub struct SessionStore {
    conn: Mutex<Connection>,
}

impl SessionStore {
    pub fn new(app_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(app_dir).ok();
        let db_path = app_dir.join("policy-chat.db");
        let conn = Connection::open(db_path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.migrate()?;
        Ok(store)
    }

    #[cfg(test)]
    pub fn in_memory() -> Self {
        let store = Self {
            conn: Mutex::new(Connection::open_in_memory().unwrap()),
        };
        store.migrate().unwrap();
        store
    }

    fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS settings (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn.lock().unwrap();
        let result = conn.query_row(
            "SELECT value FROM settings WHERE key = ?1",
            params![key],
            |row| row.get(0),
        );
        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn delete(&self, key: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute("DELETE FROM settings WHERE key = ?1", params![key])?;
        Ok(())
    }

    pub fn access_token(&self) -> Result<Option<String>> {
        self.get(ACCESS_TOKEN_KEY)
    }

    pub fn store_access_token(&self, token: &str) -> Result<()> {
        self.set(ACCESS_TOKEN_KEY, token)
    }

    pub fn clear_access_token(&self) -> Result<()> {
        self.delete(ACCESS_TOKEN_KEY)
    }

    /// Backend location, overridable via the `backend_base_url` setting.
    pub fn backend_config(&self) -> BackendConfig {
        let base_url = self
            .get(BACKEND_BASE_URL_KEY)
            .ok()
            .flatten()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        BackendConfig::new(base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_round_trip() {
        let store = SessionStore::in_memory();
        assert_eq!(store.get("missing").unwrap(), None);

        store.set("theme", "dark").unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));

        store.set("theme", "light").unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("light"));

        store.delete("theme").unwrap();
        assert_eq!(store.get("theme").unwrap(), None);
    }

    #[test]
    fn access_token_helpers_use_the_expected_key() {
        let store = SessionStore::in_memory();
        assert_eq!(store.access_token().unwrap(), None);

        store.store_access_token("jwt-token").unwrap();
        assert_eq!(store.get(ACCESS_TOKEN_KEY).unwrap().as_deref(), Some("jwt-token"));

        store.clear_access_token().unwrap();
        assert_eq!(store.access_token().unwrap(), None);
    }

    #[test]
    fn backend_config_defaults_to_localhost() {
        let store = SessionStore::in_memory();
        assert_eq!(store.backend_config().base_url, DEFAULT_BASE_URL);

        store.set("backend_base_url", "https://qa.example.com/api/v1").unwrap();
        assert_eq!(
            store.backend_config().base_url,
            "https://qa.example.com/api/v1"
        );
    }
}
