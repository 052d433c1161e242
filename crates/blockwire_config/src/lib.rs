pub mod error;
pub mod models;
pub mod provider;

pub use error::ConfigError;
pub use models::account::Account;
pub use models::client::ClientConfig;
pub use models::logging::{LogType, LoggingConfig};
pub use models::server::{ServerAddress, ServerEntry};
pub use provider::file::FileProvider;
