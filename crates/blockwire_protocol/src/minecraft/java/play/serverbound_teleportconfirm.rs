use crate::packet::packet_fields;
use crate::packet_meta;
use crate::types::VarInt;

pub const SERVERBOUND_TELEPORT_CONFIRM_ID: i32 = 0x00;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerBoundTeleportConfirm {
    pub teleport_id: VarInt,
}

packet_fields!(ServerBoundTeleportConfirm { teleport_id });
packet_meta!(
    ServerBoundTeleportConfirm,
    SERVERBOUND_TELEPORT_CONFIRM_ID,
    Play,
    Serverbound,
    "TeleportConfirm"
);

impl ServerBoundTeleportConfirm {
    pub fn new(teleport_id: i32) -> Self {
        Self {
            teleport_id: VarInt(teleport_id),
        }
    }
}
