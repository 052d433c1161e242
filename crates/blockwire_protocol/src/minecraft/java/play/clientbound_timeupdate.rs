use crate::packet::packet_fields;
use crate::packet_meta;
use crate::types::Long;

pub const CLIENTBOUND_TIME_UPDATE_ID: i32 = 0x4E;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientBoundTimeUpdate {
    pub world_age: Long,
    /// Negative when the daylight cycle is frozen.
    pub time_of_day: Long,
}

packet_fields!(ClientBoundTimeUpdate {
    world_age,
    time_of_day,
});
packet_meta!(
    ClientBoundTimeUpdate,
    CLIENTBOUND_TIME_UPDATE_ID,
    Play,
    Clientbound,
    "TimeUpdate"
);
