use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{backend_error, ApiError, BackendConfig};

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Exchanges admin credentials for a bearer token.
pub async fn login(
    config: &BackendConfig,
    username: &str,
    password: &str,
) -> Result<TokenResponse, ApiError> {
    let client = Client::new();
    let resp = client
        .post(format!("{}/auth/login", config.base_url))
        .header("Content-Type", "application/json")
        .json(&LoginRequest { username, password })
        .send()
        .await?;

    if !resp.status().is_success() {
        return Err(backend_error(resp).await);
    }

    Ok(resp.json().await?)
}

#[derive(Deserialize)]
struct InitAdminReply {
    message: String,
}

/// Development bootstrap: creates the admin account when none exists yet.
pub async fn init_admin(config: &BackendConfig) -> Result<String, ApiError> {
    let client = Client::new();
    let resp = client
        .post(format!("{}/auth/init-admin", config.base_url))
        .send()
        .await?;

    if !resp.status().is_success() {
        return Err(backend_error(resp).await);
    }

    let reply: InitAdminReply = resp.json().await?;
    Ok(reply.message)
}
