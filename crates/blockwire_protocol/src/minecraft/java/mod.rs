//! Java Edition packets for protocol 754, grouped by phase.

pub mod chat;
pub mod handshake;
pub mod login;
pub mod play;
pub mod sha1;
pub mod status;

use crate::packet::{ConnectionState, Packet};

use handshake::ServerBoundHandshake;
use login::*;
use play::*;
use status::{ClientBoundPong, ClientBoundResponse, ServerBoundPing, ServerBoundRequest};

/// Generates a closed enum over packet structs plus metadata accessors and
/// `From` conversions for each variant.
macro_rules! packet_enum {
    ($(#[$meta:meta])* $vis:vis enum $name:ident { $($variant:ident($ty:ty)),+ $(,)? }) => {
        $(#[$meta])*
        $vis enum $name {
            $($variant($ty)),+
        }

        impl $name {
            pub fn id(&self) -> i32 {
                match self {
                    $(Self::$variant(_) => <$ty as Packet>::ID),+
                }
            }

            pub fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant(_) => <$ty as Packet>::NAME),+
                }
            }

            pub fn state(&self) -> ConnectionState {
                match self {
                    $(Self::$variant(_) => <$ty as Packet>::STATE),+
                }
            }
        }

        $(
            impl From<$ty> for $name {
                fn from(packet: $ty) -> Self {
                    Self::$variant(packet)
                }
            }
        )+
    };
}

packet_enum! {
    /// Every packet this client knows how to decode from the server.
    #[derive(Debug, Clone, PartialEq)]
    pub enum ClientboundPacket {
        StatusResponse(ClientBoundResponse),
        StatusPong(ClientBoundPong),
        LoginDisconnect(ClientBoundLoginDisconnect),
        EncryptionRequest(ClientBoundEncryptionRequest),
        LoginSuccess(ClientBoundLoginSuccess),
        SetCompression(ClientBoundSetCompression),
        LoginPluginRequest(ClientBoundPluginRequest),
        BlockChange(ClientBoundBlockChange),
        ServerDifficulty(ClientBoundServerDifficulty),
        ChatMessage(ClientBoundChatMessage),
        Disconnect(ClientBoundDisconnect),
        UnloadChunk(ClientBoundUnloadChunk),
        OpenHorseWindow(ClientBoundOpenHorseWindow),
        KeepAlive(ClientBoundKeepAlive),
        ChunkData(ClientBoundChunkData),
        JoinGame(ClientBoundJoinGame),
        EntityRotation(ClientBoundEntityRotation),
        VehicleMove(ClientBoundVehicleMove),
        PlayerPositionAndLook(ClientBoundPlayerPositionAndLook),
        SpawnPosition(ClientBoundSpawnPosition),
        TimeUpdate(ClientBoundTimeUpdate),
    }
}

packet_enum! {
    /// Every packet this client sends, decodable for tooling and tests.
    #[derive(Debug, Clone, PartialEq)]
    pub enum AnyServerboundPacket {
        Handshake(ServerBoundHandshake),
        StatusRequest(ServerBoundRequest),
        StatusPing(ServerBoundPing),
        LoginStart(ServerBoundLoginStart),
        EncryptionResponse(ServerBoundEncryptionResponse),
        LoginPluginResponse(ServerBoundPluginResponse),
        TeleportConfirm(ServerBoundTeleportConfirm),
        ChatMessage(ServerBoundChatMessage),
        ClientStatus(ServerBoundClientStatus),
        KeepAlive(ServerBoundKeepAlive),
    }
}
