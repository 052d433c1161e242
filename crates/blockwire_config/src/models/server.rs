use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::ConfigError;

pub const DEFAULT_PORT: u16 = 25565;

/// `host[:port]`, port defaulting to 25565.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServerAddress {
    pub host: String,
    pub port: u16,
}

impl ServerAddress {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl FromStr for ServerAddress {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ConfigError::InvalidAddress(s.to_string()));
        }

        // Bracketed IPv6: [::1]:25565
        if let Some(rest) = s.strip_prefix('[') {
            let (host, tail) = rest
                .split_once(']')
                .ok_or_else(|| ConfigError::InvalidAddress(s.to_string()))?;
            let port = match tail.strip_prefix(':') {
                Some(p) => p
                    .parse()
                    .map_err(|_| ConfigError::InvalidAddress(s.to_string()))?,
                None if tail.is_empty() => DEFAULT_PORT,
                None => return Err(ConfigError::InvalidAddress(s.to_string())),
            };
            return Ok(ServerAddress::new(host, port));
        }

        match s.rsplit_once(':') {
            Some((host, port)) if !host.contains(':') => {
                let port = port
                    .parse()
                    .map_err(|_| ConfigError::InvalidAddress(s.to_string()))?;
                if host.is_empty() {
                    return Err(ConfigError::InvalidAddress(s.to_string()));
                }
                Ok(ServerAddress::new(host, port))
            }
            _ => Ok(ServerAddress::new(s, DEFAULT_PORT)),
        }
    }
}

impl fmt::Display for ServerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

/// A saved server in the client configuration.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ServerEntry {
    pub name: String,
    pub address: String,
}

impl ServerEntry {
    pub fn parse_address(&self) -> Result<ServerAddress, ConfigError> {
        self.address.parse()
    }
}
