use crate::minecraft::java::chat;
use crate::packet::packet_fields;
use crate::packet_meta;
use crate::types::ProtocolString;

pub const CLIENTBOUND_DISCONNECT_ID: i32 = 0x19;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientBoundDisconnect {
    pub reason: ProtocolString,
}

packet_fields!(ClientBoundDisconnect { reason });
packet_meta!(
    ClientBoundDisconnect,
    CLIENTBOUND_DISCONNECT_ID,
    Play,
    Clientbound,
    "Disconnect"
);

impl ClientBoundDisconnect {
    pub fn new(reason_json: impl Into<String>) -> Self {
        Self {
            reason: ProtocolString(reason_json.into()),
        }
    }

    pub fn reason_text(&self) -> String {
        chat::plain_text(self.reason.as_str())
    }
}
