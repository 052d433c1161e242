use crate::packet::packet_fields;
use crate::packet_meta;
use crate::types::{Boolean, RemainingBytes, VarInt};

pub const SERVERBOUND_PLUGIN_RESPONSE_ID: i32 = 0x02;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerBoundPluginResponse {
    pub message_id: VarInt,
    pub successful: Boolean,
    /// Only present when `successful` is true.
    pub data: RemainingBytes,
}

packet_fields!(ServerBoundPluginResponse {
    message_id,
    successful,
    data,
});
packet_meta!(
    ServerBoundPluginResponse,
    SERVERBOUND_PLUGIN_RESPONSE_ID,
    Login,
    Serverbound,
    "LoginPluginResponse"
);

impl ServerBoundPluginResponse {
    /// The reply for channels this client does not understand.
    pub fn not_understood(message_id: i32) -> Self {
        Self {
            message_id: VarInt(message_id),
            successful: Boolean(false),
            data: RemainingBytes::default(),
        }
    }
}
