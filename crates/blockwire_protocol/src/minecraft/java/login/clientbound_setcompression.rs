use crate::packet::packet_fields;
use crate::packet_meta;
use crate::types::VarInt;

pub const CLIENTBOUND_SET_COMPRESSION_ID: i32 = 0x03;

/// Packets whose id+payload is at least `threshold` bytes get compressed
/// from here on. A negative threshold turns compression off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientBoundSetCompression {
    pub threshold: VarInt,
}

packet_fields!(ClientBoundSetCompression { threshold });
packet_meta!(
    ClientBoundSetCompression,
    CLIENTBOUND_SET_COMPRESSION_ID,
    Login,
    Clientbound,
    "SetCompression"
);

impl ClientBoundSetCompression {
    pub fn new(threshold: i32) -> Self {
        Self {
            threshold: VarInt(threshold),
        }
    }
}
