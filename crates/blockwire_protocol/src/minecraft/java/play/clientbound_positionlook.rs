use crate::packet::packet_fields;
use crate::packet_meta;
use crate::types::{Byte, Double, Float, VarInt};

pub const CLIENTBOUND_PLAYER_POSITION_AND_LOOK_ID: i32 = 0x34;

pub const RELATIVE_X: i8 = 0x01;
pub const RELATIVE_Y: i8 = 0x02;
pub const RELATIVE_Z: i8 = 0x04;
pub const RELATIVE_YAW: i8 = 0x08;
pub const RELATIVE_PITCH: i8 = 0x10;

/// Server-side teleport. Each flagged field is an offset from the current
/// value instead of an absolute value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClientBoundPlayerPositionAndLook {
    pub x: Double,
    pub y: Double,
    pub z: Double,
    pub yaw: Float,
    pub pitch: Float,
    pub flags: Byte,
    pub teleport_id: VarInt,
}

packet_fields!(ClientBoundPlayerPositionAndLook {
    x,
    y,
    z,
    yaw,
    pitch,
    flags,
    teleport_id,
});
packet_meta!(
    ClientBoundPlayerPositionAndLook,
    CLIENTBOUND_PLAYER_POSITION_AND_LOOK_ID,
    Play,
    Clientbound,
    "PlayerPositionAndLook"
);

impl ClientBoundPlayerPositionAndLook {
    pub fn is_relative(&self, flag: i8) -> bool {
        self.flags.0 & flag != 0
    }

    /// Resolves the packet against the current position and rotation.
    pub fn apply(&self, position: [f64; 3], rotation: [f32; 2]) -> ([f64; 3], [f32; 2]) {
        let axis = |flag, current: f64, value: f64| {
            if self.is_relative(flag) { current + value } else { value }
        };
        let angle = |flag, current: f32, value: f32| {
            if self.is_relative(flag) { current + value } else { value }
        };

        (
            [
                axis(RELATIVE_X, position[0], self.x.0),
                axis(RELATIVE_Y, position[1], self.y.0),
                axis(RELATIVE_Z, position[2], self.z.0),
            ],
            [
                angle(RELATIVE_YAW, rotation[0], self.yaw.0),
                angle(RELATIVE_PITCH, rotation[1], self.pitch.0),
            ],
        )
    }
}
