use crate::packet::packet_fields;
use crate::packet_meta;
use crate::types::{Byte, Int, VarInt};

pub const CLIENTBOUND_OPEN_HORSE_WINDOW_ID: i32 = 0x1E;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientBoundOpenHorseWindow {
    pub window_id: Byte,
    pub slot_count: VarInt,
    pub entity_id: Int,
}

packet_fields!(ClientBoundOpenHorseWindow {
    window_id,
    slot_count,
    entity_id,
});
packet_meta!(
    ClientBoundOpenHorseWindow,
    CLIENTBOUND_OPEN_HORSE_WINDOW_ID,
    Play,
    Clientbound,
    "OpenHorseWindow"
);
