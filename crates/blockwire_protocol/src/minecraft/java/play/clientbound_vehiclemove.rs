use crate::packet::packet_fields;
use crate::packet_meta;
use crate::types::{Double, Float};

pub const CLIENTBOUND_VEHICLE_MOVE_ID: i32 = 0x2B;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClientBoundVehicleMove {
    pub x: Double,
    pub y: Double,
    pub z: Double,
    pub yaw: Float,
    pub pitch: Float,
}

packet_fields!(ClientBoundVehicleMove { x, y, z, yaw, pitch });
packet_meta!(
    ClientBoundVehicleMove,
    CLIENTBOUND_VEHICLE_MOVE_ID,
    Play,
    Clientbound,
    "VehicleMove"
);
