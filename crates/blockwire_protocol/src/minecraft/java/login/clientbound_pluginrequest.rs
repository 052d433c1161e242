use crate::packet::packet_fields;
use crate::packet_meta;
use crate::types::{Identifier, RemainingBytes, VarInt};

pub const CLIENTBOUND_PLUGIN_REQUEST_ID: i32 = 0x04;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientBoundPluginRequest {
    pub message_id: VarInt,
    pub channel: Identifier,
    /// Runs to the end of the packet; there is no length prefix.
    pub data: RemainingBytes,
}

packet_fields!(ClientBoundPluginRequest {
    message_id,
    channel,
    data,
});
packet_meta!(
    ClientBoundPluginRequest,
    CLIENTBOUND_PLUGIN_REQUEST_ID,
    Login,
    Clientbound,
    "LoginPluginRequest"
);

impl ClientBoundPluginRequest {
    pub fn new(message_id: i32, channel: Identifier, data: Vec<u8>) -> Self {
        Self {
            message_id: VarInt(message_id),
            channel,
            data: RemainingBytes(data.into()),
        }
    }
}
