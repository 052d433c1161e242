use std::time::Duration;

use blockwire_protocol::ProtocolVersion;
use serde::Deserialize;

use super::account::Account;
use super::logging::LoggingConfig;
use super::server::ServerEntry;
use crate::ConfigError;

/// Top-level `client.yml`. Every field has a default, so an empty file is a
/// valid configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ClientConfig {
    #[serde(default)]
    pub protocol_version: ProtocolVersion,

    /// Bound on TCP connection establishment, in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Bound on a whole status ping, in seconds.
    #[serde(default = "default_ping_timeout_secs")]
    pub ping_timeout_secs: u64,

    #[serde(default)]
    pub account: Account,

    #[serde(default)]
    pub servers: Vec<ServerEntry>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_connect_timeout_secs() -> u64 {
    5
}

fn default_ping_timeout_secs() -> u64 {
    5
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            protocol_version: ProtocolVersion::default(),
            connect_timeout_secs: default_connect_timeout_secs(),
            ping_timeout_secs: default_ping_timeout_secs(),
            account: Account::default(),
            servers: Vec::new(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ClientConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn ping_timeout(&self) -> Duration {
        Duration::from_secs(self.ping_timeout_secs)
    }

    pub fn find_server(&self, name: &str) -> Option<&ServerEntry> {
        self.servers.iter().find(|s| s.name.eq_ignore_ascii_case(name))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.protocol_version.is_supported() {
            return Err(ConfigError::Invalid(format!(
                "unsupported protocol version {}",
                self.protocol_version.protocol_number()
            )));
        }
        if self.connect_timeout_secs == 0 || self.ping_timeout_secs == 0 {
            return Err(ConfigError::Invalid("timeouts must be at least 1 second".into()));
        }
        self.account.validate()?;
        for server in &self.servers {
            server.parse_address()?;
        }
        Ok(())
    }
}
