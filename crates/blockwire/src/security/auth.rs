//! Session-server join for online accounts.
//!
//! Before answering an `EncryptionRequest` an online client must tell the
//! session server it is joining the server identified by the server hash.
//! The game server later asks the same service whether that join happened.

use async_trait::async_trait;
use blockwire_config::{Account, LogType};
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, error};

use crate::core::error::AuthError;

pub const SESSION_SERVER_JOIN_URL: &str = "https://sessionserver.mojang.com/session/minecraft/join";

#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Registers the join for `server_hash`. Returns once the session server
    /// has accepted it.
    async fn join_server(&self, account: &Account, server_hash: &str) -> Result<(), AuthError>;
}

/// Used for offline accounts, which cannot join authenticated servers.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineAuthenticator;

#[async_trait]
impl Authenticator for OfflineAuthenticator {
    async fn join_server(&self, account: &Account, _server_hash: &str) -> Result<(), AuthError> {
        Err(AuthError::OfflineAccount(account.username().to_string()))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JoinRequest<'a> {
    access_token: &'a str,
    selected_profile: String,
    server_id: &'a str,
}

#[derive(Debug, Clone)]
pub struct SessionServerAuthenticator {
    client: Client,
    join_url: String,
}

impl Default for SessionServerAuthenticator {
    fn default() -> Self {
        Self::new(SESSION_SERVER_JOIN_URL)
    }
}

impl SessionServerAuthenticator {
    pub fn new(join_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            join_url: join_url.into(),
        }
    }
}

#[async_trait]
impl Authenticator for SessionServerAuthenticator {
    async fn join_server(&self, account: &Account, server_hash: &str) -> Result<(), AuthError> {
        let Account::Online {
            uuid, access_token, ..
        } = account
        else {
            return Err(AuthError::OfflineAccount(account.username().to_string()));
        };

        let body = JoinRequest {
            access_token,
            selected_profile: uuid.simple().to_string(),
            server_id: server_hash,
        };

        debug!(
            log_type = LogType::Authentication.as_str(),
            "Joining server hash {} as {}",
            server_hash,
            account.username()
        );

        let response = self.client.post(&self.join_url).json(&body).send().await?;
        let status = response.status();
        if status.as_u16() == 204 {
            debug!(
                log_type = LogType::Authentication.as_str(),
                "Session server accepted the join"
            );
            return Ok(());
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        error!(
            log_type = LogType::Authentication.as_str(),
            "Session server join failed: {} - {}", status, error_text
        );
        Err(AuthError::Rejected {
            status: status.as_u16(),
            body: error_text,
        })
    }
}
