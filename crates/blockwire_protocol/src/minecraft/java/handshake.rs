use crate::packet::{ConnectionState, packet_fields};
use crate::packet_meta;
use crate::types::{ProtocolString, UnsignedShort, VarInt};
use crate::version::ProtocolVersion;

pub const SERVERBOUND_HANDSHAKE_ID: i32 = 0x00;

/// Forge appends `\0FML\0` style markers to the address; they are stripped
/// before the address is shown anywhere.
const SEPARATOR_FORGE: &str = "\0";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerBoundHandshake {
    pub protocol_version: VarInt,
    pub server_address: ProtocolString,
    pub server_port: UnsignedShort,
    pub next_state: VarInt,
}

packet_fields!(ServerBoundHandshake {
    protocol_version,
    server_address,
    server_port,
    next_state,
});

packet_meta!(
    ServerBoundHandshake,
    SERVERBOUND_HANDSHAKE_ID,
    Handshaking,
    Serverbound,
    "Handshake"
);

impl ServerBoundHandshake {
    pub const STATE_STATUS: i32 = ConnectionState::INTENT_STATUS;
    pub const STATE_LOGIN: i32 = ConnectionState::INTENT_LOGIN;

    pub fn new(
        protocol_version: ProtocolVersion,
        server_address: impl Into<String>,
        server_port: u16,
        next_state: i32,
    ) -> Self {
        Self {
            protocol_version: protocol_version.to_varint(),
            server_address: ProtocolString(server_address.into()),
            server_port: UnsignedShort(server_port),
            next_state: VarInt(next_state),
        }
    }

    pub fn is_status_request(&self) -> bool {
        self.next_state.0 == Self::STATE_STATUS
    }

    pub fn is_login_request(&self) -> bool {
        self.next_state.0 == Self::STATE_LOGIN
    }

    /// The phase the server switches to after this handshake.
    pub fn target_state(&self) -> Option<ConnectionState> {
        ConnectionState::from_handshake_intent(self.next_state.0)
    }

    pub fn parse_server_address(&self) -> String {
        let addr = &self.server_address.0;
        let addr = match addr.find(SEPARATOR_FORGE) {
            Some(idx) => &addr[..idx],
            None => addr,
        };
        addr.trim_matches('.').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet::{Packet, ServerboundPacket};
    use crate::types::ProtocolRead;

    #[test]
    fn test_handshake_wire_layout() {
        let handshake = ServerBoundHandshake::new(
            ProtocolVersion::V1_16_5,
            "localhost",
            25565,
            ServerBoundHandshake::STATE_LOGIN,
        );

        let raw = handshake.to_raw().unwrap();
        assert_eq!(raw.id, 0x00);
        assert_eq!(
            &raw.body[..],
            &[
                0xf2, 0x05, // 754
                0x09, b'l', b'o', b'c', b'a', b'l', b'h', b'o', b's', b't', //
                0x63, 0xdd, // 25565
                0x02,
            ]
        );

        let (decoded, n) = ServerBoundHandshake::read_from(&mut raw.body.clone()).unwrap();
        assert_eq!(n, raw.body.len());
        assert_eq!(decoded, handshake);
        assert!(decoded.is_login_request());
        assert_eq!(decoded.target_state(), Some(ConnectionState::Login));
        assert_eq!(ServerBoundHandshake::STATE, ConnectionState::Handshaking);
    }

    #[test]
    fn test_parse_server_address() {
        let handshake = ServerBoundHandshake::new(
            ProtocolVersion::V1_16_5,
            "mc.example.com.\0FML2\0",
            25565,
            ServerBoundHandshake::STATE_STATUS,
        );
        assert_eq!(handshake.parse_server_address(), "mc.example.com");
        assert!(handshake.is_status_request());
    }
}
