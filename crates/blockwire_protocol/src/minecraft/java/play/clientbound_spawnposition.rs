use crate::packet::packet_fields;
use crate::packet_meta;
use crate::types::Position;

pub const CLIENTBOUND_SPAWN_POSITION_ID: i32 = 0x42;

/// World spawn point. Also the last packet of the initial terrain burst.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientBoundSpawnPosition {
    pub location: Position,
}

packet_fields!(ClientBoundSpawnPosition { location });
packet_meta!(
    ClientBoundSpawnPosition,
    CLIENTBOUND_SPAWN_POSITION_ID,
    Play,
    Clientbound,
    "SpawnPosition"
);
