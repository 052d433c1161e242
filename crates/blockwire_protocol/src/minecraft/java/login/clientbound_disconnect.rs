use crate::minecraft::java::chat;
use crate::packet::packet_fields;
use crate::packet_meta;
use crate::types::ProtocolString;

pub const CLIENTBOUND_LOGIN_DISCONNECT_ID: i32 = 0x00;

/// Sent instead of `LoginSuccess` when the server rejects the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientBoundLoginDisconnect {
    pub reason: ProtocolString,
}

packet_fields!(ClientBoundLoginDisconnect { reason });
packet_meta!(
    ClientBoundLoginDisconnect,
    CLIENTBOUND_LOGIN_DISCONNECT_ID,
    Login,
    Clientbound,
    "LoginDisconnect"
);

impl ClientBoundLoginDisconnect {
    pub fn new(reason_json: impl Into<String>) -> Self {
        Self {
            reason: ProtocolString(reason_json.into()),
        }
    }

    pub fn reason_text(&self) -> String {
        chat::plain_text(self.reason.as_str())
    }
}
