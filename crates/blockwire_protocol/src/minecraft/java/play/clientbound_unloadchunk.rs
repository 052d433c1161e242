use crate::packet::packet_fields;
use crate::packet_meta;
use crate::types::Int;

pub const CLIENTBOUND_UNLOAD_CHUNK_ID: i32 = 0x1C;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientBoundUnloadChunk {
    pub chunk_x: Int,
    pub chunk_z: Int,
}

packet_fields!(ClientBoundUnloadChunk { chunk_x, chunk_z });
packet_meta!(
    ClientBoundUnloadChunk,
    CLIENTBOUND_UNLOAD_CHUNK_ID,
    Play,
    Clientbound,
    "UnloadChunk"
);
