use crate::packet::packet_fields;
use crate::packet_meta;
use crate::types::ProtocolString;

pub const SERVERBOUND_CHAT_ID: i32 = 0x03;

/// Longest message the server accepts, in characters.
pub const MAX_CHAT_LENGTH: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerBoundChatMessage {
    pub message: ProtocolString,
}

packet_fields!(ServerBoundChatMessage { message });
packet_meta!(
    ServerBoundChatMessage,
    SERVERBOUND_CHAT_ID,
    Play,
    Serverbound,
    "ChatMessage"
);

impl ServerBoundChatMessage {
    /// Truncates to [`MAX_CHAT_LENGTH`] characters; the server would kick
    /// for anything longer.
    pub fn new(message: &str) -> Self {
        let message: String = message.chars().take(MAX_CHAT_LENGTH).collect();
        Self {
            message: ProtocolString(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_truncation() {
        let long = "x".repeat(300);
        assert_eq!(ServerBoundChatMessage::new(&long).message.0.len(), MAX_CHAT_LENGTH);
        assert_eq!(ServerBoundChatMessage::new("hi").message.as_str(), "hi");
    }
}
