//! Client session: login state machine, player/world state and the packet
//! handlers that keep them current.

pub mod handlers;
pub mod state;

use std::sync::Arc;

use async_trait::async_trait;
use blockwire_config::{Account, ClientConfig, LogType, ServerAddress};
use blockwire_event::{EventBus, WorldInfo};
use blockwire_protocol::minecraft::java::login::ServerBoundLoginStart;
use blockwire_protocol::minecraft::java::play::ServerBoundChatMessage;
use blockwire_protocol::{ClientboundPacket, ConnectionState};
use tracing::debug;

pub use handlers::{HandlePacket, HandlerContext};
pub use state::{PlayerState, SessionState};

use crate::core::error::{HandlerError, Result};
use crate::network::connection::{Connection, ConnectionOptions};
use crate::security::{Authenticator, OfflineAuthenticator, SessionServerAuthenticator};

/// Receives every decoded clientbound packet, on the receive task.
///
/// Errors are logged by the connection and never close it.
#[async_trait]
pub trait PacketHandler: Send + Sync {
    async fn handle(
        &self,
        connection: &Connection,
        packet: ClientboundPacket,
    ) -> std::result::Result<(), HandlerError>;
}

/// Routes packets to their [`HandlePacket`] impl against one session.
pub struct SessionHandler {
    state: Arc<SessionState>,
}

#[async_trait]
impl PacketHandler for SessionHandler {
    async fn handle(
        &self,
        connection: &Connection,
        packet: ClientboundPacket,
    ) -> std::result::Result<(), HandlerError> {
        let ctx = HandlerContext {
            connection,
            session: &self.state,
        };
        packet.handle(&ctx).await
    }
}

/// One account talking to one server.
#[derive(Debug, Clone)]
pub struct ServerSession {
    connection: Connection,
    state: Arc<SessionState>,
}

impl ServerSession {
    /// Online accounts authenticate against the session server, offline
    /// ones refuse encrypted logins.
    pub fn new(config: &ClientConfig, address: ServerAddress, events: Arc<EventBus>) -> Result<Self> {
        let authenticator: Arc<dyn Authenticator> = if config.account.is_online() {
            Arc::new(SessionServerAuthenticator::default())
        } else {
            Arc::new(OfflineAuthenticator)
        };
        Self::with_authenticator(config, config.account.clone(), address, events, authenticator)
    }

    pub fn with_authenticator(
        config: &ClientConfig,
        account: Account,
        address: ServerAddress,
        events: Arc<EventBus>,
        authenticator: Arc<dyn Authenticator>,
    ) -> Result<Self> {
        let options = ConnectionOptions {
            protocol_version: config.protocol_version,
            connect_timeout: config.connect_timeout(),
        };
        Ok(Self {
            connection: Connection::new(address, options, events)?,
            state: Arc::new(SessionState::new(account, authenticator)),
        })
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    pub fn events(&self) -> &Arc<EventBus> {
        self.connection.events()
    }

    pub fn state(&self) -> &Arc<SessionState> {
        &self.state
    }

    pub fn player(&self) -> PlayerState {
        self.state.player()
    }

    pub fn world(&self) -> Option<WorldInfo> {
        self.state.world()
    }

    pub fn handler(&self) -> Arc<dyn PacketHandler> {
        Arc::new(SessionHandler {
            state: self.state.clone(),
        })
    }

    /// Opens the transport with this session's handlers attached.
    pub async fn connect(&self) -> Result<()> {
        self.state.reset();
        self.connection.connect(self.handler()).await
    }

    /// Connects, handshakes into `Login` and sends `LoginStart`. The rest
    /// of the login runs in the handlers.
    pub async fn join(&self) -> Result<()> {
        if self.connection.state() != ConnectionState::Idle {
            self.connection.restart().await;
        }
        self.connect().await?;

        let username = self.state.account().username().to_string();
        debug!(
            log_type = LogType::Session.as_str(),
            "Logging in to {} as {}",
            self.connection.address(),
            username
        );
        self.connection
            .handshake(ConnectionState::Login, |connection| async move {
                connection
                    .send_packet(&ServerBoundLoginStart::new(username))
                    .await
            })
            .await
    }

    pub async fn send_chat(&self, message: &str) -> Result<()> {
        self.connection
            .send_packet(&ServerBoundChatMessage::new(message))
            .await
    }

    pub async fn disconnect(&self) {
        self.connection.close().await;
    }
}
