use uuid::Uuid;

use crate::minecraft::java::chat;
use crate::packet::packet_fields;
use crate::packet_meta;
use crate::types::{Byte, ProtocolString, ProtocolUUID};

pub const CLIENTBOUND_CHAT_ID: i32 = 0x0E;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatPosition {
    Chat,
    System,
    GameInfo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientBoundChatMessage {
    pub json_data: ProtocolString,
    pub position: Byte,
    /// Nil for system messages.
    pub sender: ProtocolUUID,
}

packet_fields!(ClientBoundChatMessage {
    json_data,
    position,
    sender,
});
packet_meta!(
    ClientBoundChatMessage,
    CLIENTBOUND_CHAT_ID,
    Play,
    Clientbound,
    "ChatMessage"
);

impl ClientBoundChatMessage {
    pub fn new(json: impl Into<String>, position: ChatPosition, sender: Uuid) -> Self {
        Self {
            json_data: ProtocolString(json.into()),
            position: Byte(position as i8),
            sender: ProtocolUUID(sender),
        }
    }

    pub fn position(&self) -> ChatPosition {
        match self.position.0 {
            1 => ChatPosition::System,
            2 => ChatPosition::GameInfo,
            _ => ChatPosition::Chat,
        }
    }

    pub fn text(&self) -> String {
        chat::plain_text(self.json_data.as_str())
    }
}
