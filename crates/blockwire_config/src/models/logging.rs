use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub debug: bool,

    #[serde(default = "default_true")]
    pub use_color: bool,

    #[serde(default = "default_true")]
    pub show_timestamp: bool,

    #[serde(default)]
    pub show_target: bool,

    /// `EnvFilter` directives; `RUST_LOG` wins when set.
    #[serde(default)]
    pub filter: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            debug: false,
            use_color: true,
            show_timestamp: true,
            show_target: false,
            filter: None,
        }
    }
}

impl LoggingConfig {
    pub fn default_directive(&self) -> &'static str {
        if self.debug { "debug" } else { "info" }
    }
}

/// Value of the `log_type` field attached to log events, used to filter and
/// group output by subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogType {
    TcpConnection,
    PacketProcessing,
    Authentication,
    Session,
    Events,
    ConfigProvider,
    Ping,
}

impl LogType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogType::TcpConnection => "tcp_connection",
            LogType::PacketProcessing => "packet_processing",
            LogType::Authentication => "authentication",
            LogType::Session => "session",
            LogType::Events => "events",
            LogType::ConfigProvider => "config_provider",
            LogType::Ping => "ping",
        }
    }
}

impl std::fmt::Display for LogType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
