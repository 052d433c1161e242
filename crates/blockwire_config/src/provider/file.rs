use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::{ClientConfig, ConfigError, LogType};

pub const DEFAULT_CONFIG_FILE: &str = "client.yml";

/// Loads [`ClientConfig`] from YAML on disk.
pub struct FileProvider {
    path: PathBuf,
}

impl FileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<ClientConfig, ConfigError> {
        let content = fs::read_to_string(&self.path).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })?;

        let config = Self::parse(&content)?;
        debug!(
            log_type = LogType::ConfigProvider.as_str(),
            path = %self.path.display(),
            servers = config.servers.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<ClientConfig, ConfigError> {
        // serde_yaml rejects an empty document for a struct.
        if content.trim().is_empty() {
            return Ok(ClientConfig::default());
        }
        let config: ClientConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// An explicit path must exist. Without one, `client.yml` in the working
    /// directory is used when present and defaults otherwise.
    pub fn try_load_config(path: Option<&Path>) -> Result<ClientConfig, ConfigError> {
        match path {
            Some(path) => FileProvider::new(path).load(),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    FileProvider::new(default_path).load()
                } else {
                    info!(
                        log_type = LogType::ConfigProvider.as_str(),
                        "No {} found, using defaults", DEFAULT_CONFIG_FILE
                    );
                    Ok(ClientConfig::default())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Account;
    use blockwire_protocol::ProtocolVersion;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = FileProvider::parse("").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.protocol_version, ProtocolVersion::V1_16_5);
        assert_eq!(config.connect_timeout(), Duration::from_secs(5));
        assert_eq!(config.account.username(), "Player");
        assert!(!config.logging.debug);
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("client.yml");
        fs::write(
            &config_path,
            r#"
connect_timeout_secs: 3
account:
  type: online
  username: Steve
  uuid: 4566e69f-c907-48ee-8d71-d7ba5aa00d20
  access_token: token
servers:
  - name: local
    address: "127.0.0.1:25566"
logging:
  debug: true
"#,
        )
        .unwrap();

        let config = FileProvider::try_load_config(Some(&config_path)).unwrap();
        assert_eq!(config.connect_timeout_secs, 3);
        assert_eq!(config.ping_timeout_secs, 5);
        assert!(config.account.is_online());
        assert!(matches!(config.account, Account::Online { ref access_token, .. } if access_token == "token"));
        assert_eq!(
            config.find_server("LOCAL").unwrap().parse_address().unwrap().port,
            25566
        );
        assert!(config.logging.debug);
        assert!(config.logging.use_color);
    }

    #[test]
    fn test_missing_explicit_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = FileProvider::try_load_config(Some(&temp_dir.path().join("nope.yml")));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            FileProvider::parse("protocol_version: 758"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            FileProvider::parse("ping_timeout_secs: 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            FileProvider::parse("servers:\n  - name: x\n    address: 'a:b'"),
            Err(ConfigError::InvalidAddress(_))
        ));
        assert!(matches!(
            FileProvider::parse("connect_timeout_secs: [1]"),
            Err(ConfigError::Parse(_))
        ));
    }
}
