use std::fmt;

use serde::Deserialize;
use uuid::Uuid;

use crate::ConfigError;

/// Who the client logs in as. The protocol core only reads the username
/// and, for online accounts, hands the token to the session server.
#[derive(Clone, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Account {
    Offline {
        username: String,
    },
    Online {
        username: String,
        uuid: Uuid,
        access_token: String,
    },
}

impl Default for Account {
    fn default() -> Self {
        Account::Offline {
            username: "Player".to_string(),
        }
    }
}

impl Account {
    pub fn offline(username: impl Into<String>) -> Self {
        Account::Offline {
            username: username.into(),
        }
    }

    pub fn username(&self) -> &str {
        match self {
            Account::Offline { username } | Account::Online { username, .. } => username,
        }
    }

    pub fn is_online(&self) -> bool {
        matches!(self, Account::Online { .. })
    }

    /// 3 to 16 characters of `[A-Za-z0-9_]`, as vanilla servers enforce.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let name = self.username();
        let valid_chars = name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !(3..=16).contains(&name.len()) || !valid_chars {
            return Err(ConfigError::Invalid(format!("invalid username '{name}'")));
        }
        if let Account::Online { access_token, .. } = self {
            if access_token.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "online account '{name}' has no access token"
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Account::Offline { username } => {
                f.debug_struct("Offline").field("username", username).finish()
            }
            Account::Online { username, uuid, .. } => f
                .debug_struct("Online")
                .field("username", username)
                .field("uuid", uuid)
                .field("access_token", &"<redacted>")
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_validation() {
        assert!(Account::offline("Steve").validate().is_ok());
        assert!(Account::offline("a_b_9").validate().is_ok());
        assert!(Account::offline("ab").validate().is_err());
        assert!(Account::offline("seventeen_chars__").validate().is_err());
        assert!(Account::offline("bad name").validate().is_err());
    }

    #[test]
    fn test_debug_redacts_token() {
        let account = Account::Online {
            username: "Steve".into(),
            uuid: Uuid::nil(),
            access_token: "secret-token".into(),
        };
        let printed = format!("{account:?}");
        assert!(!printed.contains("secret-token"));
        assert!(printed.contains("Steve"));
    }
}
