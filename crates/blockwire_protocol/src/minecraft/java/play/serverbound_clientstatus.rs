use crate::packet::packet_fields;
use crate::packet_meta;
use crate::types::VarInt;

pub const SERVERBOUND_CLIENT_STATUS_ID: i32 = 0x04;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientStatusAction {
    PerformRespawn = 0,
    RequestStats = 1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerBoundClientStatus {
    pub action_id: VarInt,
}

packet_fields!(ServerBoundClientStatus { action_id });
packet_meta!(
    ServerBoundClientStatus,
    SERVERBOUND_CLIENT_STATUS_ID,
    Play,
    Serverbound,
    "ClientStatus"
);

impl ServerBoundClientStatus {
    pub fn new(action: ClientStatusAction) -> Self {
        Self {
            action_id: VarInt(action as i32),
        }
    }

    pub fn action(&self) -> Option<ClientStatusAction> {
        match self.action_id.0 {
            0 => Some(ClientStatusAction::PerformRespawn),
            1 => Some(ClientStatusAction::RequestStats),
            _ => None,
        }
    }
}
