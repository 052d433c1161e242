//! Per-packet reactions of the client session.
//!
//! Every clientbound packet type implements [`HandlePacket`]. Handlers run
//! on the receive task, one at a time, in wire order.

mod login;
mod play;
mod status;

use async_trait::async_trait;
use blockwire_event::EventBus;
use blockwire_protocol::{ClientboundPacket, Packet};

use super::state::SessionState;
use crate::core::error::HandlerError;
use crate::network::connection::Connection;

/// Everything a handler may touch.
pub struct HandlerContext<'a> {
    pub connection: &'a Connection,
    pub session: &'a SessionState,
}

impl HandlerContext<'_> {
    pub fn events(&self) -> &EventBus {
        self.connection.events()
    }

    /// The connection must be in the state the packet belongs to.
    pub fn expect_state<P: Packet>(&self) -> Result<(), HandlerError> {
        let actual = self.connection.state();
        if actual != P::STATE {
            return Err(HandlerError::ProtocolStateMismatch {
                packet: P::NAME,
                expected: P::STATE,
                actual,
            });
        }
        Ok(())
    }

    /// Play packets additionally require a completed login.
    pub fn expect_play<P: Packet>(&self) -> Result<(), HandlerError> {
        self.expect_state::<P>()?;
        if !self.session.is_logged_in() {
            return Err(HandlerError::NotLoggedIn(P::NAME));
        }
        Ok(())
    }
}

#[async_trait]
pub trait HandlePacket: Send {
    async fn handle(self, ctx: &HandlerContext<'_>) -> Result<(), HandlerError>;
}

#[async_trait]
impl HandlePacket for ClientboundPacket {
    async fn handle(self, ctx: &HandlerContext<'_>) -> Result<(), HandlerError> {
        match self {
            ClientboundPacket::StatusResponse(p) => p.handle(ctx).await,
            ClientboundPacket::StatusPong(p) => p.handle(ctx).await,
            ClientboundPacket::LoginDisconnect(p) => p.handle(ctx).await,
            ClientboundPacket::EncryptionRequest(p) => p.handle(ctx).await,
            ClientboundPacket::LoginSuccess(p) => p.handle(ctx).await,
            ClientboundPacket::SetCompression(p) => p.handle(ctx).await,
            ClientboundPacket::LoginPluginRequest(p) => p.handle(ctx).await,
            ClientboundPacket::BlockChange(p) => p.handle(ctx).await,
            ClientboundPacket::ServerDifficulty(p) => p.handle(ctx).await,
            ClientboundPacket::ChatMessage(p) => p.handle(ctx).await,
            ClientboundPacket::Disconnect(p) => p.handle(ctx).await,
            ClientboundPacket::UnloadChunk(p) => p.handle(ctx).await,
            ClientboundPacket::OpenHorseWindow(p) => p.handle(ctx).await,
            ClientboundPacket::KeepAlive(p) => p.handle(ctx).await,
            ClientboundPacket::ChunkData(p) => p.handle(ctx).await,
            ClientboundPacket::JoinGame(p) => p.handle(ctx).await,
            ClientboundPacket::EntityRotation(p) => p.handle(ctx).await,
            ClientboundPacket::VehicleMove(p) => p.handle(ctx).await,
            ClientboundPacket::PlayerPositionAndLook(p) => p.handle(ctx).await,
            ClientboundPacket::SpawnPosition(p) => p.handle(ctx).await,
            ClientboundPacket::TimeUpdate(p) => p.handle(ctx).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use blockwire_config::{Account, ServerAddress};
    use blockwire_protocol::ConnectionState;
    use blockwire_protocol::minecraft::java::play::{
        ClientBoundKeepAlive, ClientBoundSpawnPosition,
    };
    use blockwire_protocol::types::{Long, Position};

    use crate::network::connection::ConnectionOptions;
    use crate::security::OfflineAuthenticator;

    fn idle_context() -> (Connection, SessionState) {
        let connection = Connection::new(
            ServerAddress::new("127.0.0.1", 25565),
            ConnectionOptions::default(),
            Arc::new(EventBus::new()),
        )
        .unwrap();
        let session = SessionState::new(Account::default(), Arc::new(OfflineAuthenticator));
        (connection, session)
    }

    #[tokio::test]
    async fn test_play_packet_before_login_is_state_mismatch() {
        let (connection, session) = idle_context();
        let ctx = HandlerContext {
            connection: &connection,
            session: &session,
        };

        let packet = ClientboundPacket::from(ClientBoundKeepAlive {
            keep_alive_id: Long(1),
        });
        let err = packet.handle(&ctx).await.unwrap_err();
        assert!(matches!(
            err,
            HandlerError::ProtocolStateMismatch {
                expected: ConnectionState::Play,
                actual: ConnectionState::Idle,
                ..
            }
        ));
        assert!(err.is_state_mismatch());
    }

    #[tokio::test]
    async fn test_spawn_position_before_login_leaves_player_untouched() {
        let (connection, session) = idle_context();
        let ctx = HandlerContext {
            connection: &connection,
            session: &session,
        };

        let packet = ClientBoundSpawnPosition {
            location: Position::new(1, 64, 1),
        };
        assert!(packet.handle(&ctx).await.is_err());
        assert_eq!(session.player().spawn, None);
        assert!(!session.player().terrain_loaded);
    }
}
