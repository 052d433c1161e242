//! Events raised by a connection and its session while packets are handled.

use bytes::Bytes;
use uuid::Uuid;

use blockwire_protocol::ConnectionState;
use blockwire_protocol::minecraft::java::play::{ChatPosition, Difficulty, GameMode};
use blockwire_protocol::minecraft::java::status::ServerStatus;
use blockwire_protocol::types::{Identifier, Position};

/// The receive loop is running and the transport is ready for the first
/// packet. Raised once per successful `connect`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionReady {
    pub address: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionStateChanged {
    pub from: ConnectionState,
    pub to: ConnectionState,
}

/// The transport is gone. Raised exactly once per connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disconnected {
    pub reason: String,
}

/// The server closed the session with an explicit reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerDisconnect {
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginFinished {
    pub uuid: Uuid,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PingResult {
    pub status: ServerStatus,
}

/// World parameters received in `JoinGame`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldInfo {
    pub world_name: Identifier,
    pub world_names: Vec<Identifier>,
    pub hashed_seed: i64,
    pub max_players: i32,
    pub view_distance: i32,
    pub hardcore: bool,
    pub debug: bool,
    pub flat: bool,
    pub reduced_debug_info: bool,
    pub respawn_screen: bool,
    pub difficulty: Difficulty,
    pub difficulty_locked: bool,
    pub time_of_day: i64,
    pub world_age: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinWorld {
    pub entity_id: i32,
    pub game_mode: GameMode,
    pub world: WorldInfo,
}

/// Initial terrain has arrived and the client asked to respawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerrainReady {
    pub spawn: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetBlock {
    pub position: Position,
    pub block_state: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateChunk {
    pub chunk_x: i32,
    pub chunk_z: i32,
    pub full_chunk: bool,
    pub primary_bit_mask: i32,
    /// Undecoded heightmaps, biomes, sections and block entities.
    pub data: Bytes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnloadChunk {
    pub chunk_x: i32,
    pub chunk_z: i32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityRotationChanged {
    pub entity_id: i32,
    pub yaw: f32,
    pub pitch: f32,
    pub on_ground: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleMoved {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub yaw: f32,
    pub pitch: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HorseWindowOpened {
    pub window_id: i8,
    pub slot_count: i32,
    pub entity_id: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReceived {
    pub text: String,
    pub json: String,
    pub position: ChatPosition,
    pub sender: Uuid,
}
