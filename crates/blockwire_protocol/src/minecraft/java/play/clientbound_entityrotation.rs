use crate::packet::packet_fields;
use crate::packet_meta;
use crate::types::{Angle, Boolean, VarInt};

pub const CLIENTBOUND_ENTITY_ROTATION_ID: i32 = 0x29;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientBoundEntityRotation {
    pub entity_id: VarInt,
    pub yaw: Angle,
    pub pitch: Angle,
    pub on_ground: Boolean,
}

packet_fields!(ClientBoundEntityRotation {
    entity_id,
    yaw,
    pitch,
    on_ground,
});
packet_meta!(
    ClientBoundEntityRotation,
    CLIENTBOUND_ENTITY_ROTATION_ID,
    Play,
    Clientbound,
    "EntityRotation"
);
