use crate::packet::packet_fields;
use crate::packet_meta;
use crate::types::{Position, VarInt};

pub const CLIENTBOUND_BLOCK_CHANGE_ID: i32 = 0x0B;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientBoundBlockChange {
    pub location: Position,
    /// Global palette id of the new block state.
    pub block_id: VarInt,
}

packet_fields!(ClientBoundBlockChange { location, block_id });
packet_meta!(
    ClientBoundBlockChange,
    CLIENTBOUND_BLOCK_CHANGE_ID,
    Play,
    Clientbound,
    "BlockChange"
);
