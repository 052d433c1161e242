pub mod clientbound_response;

use crate::packet::packet_fields;
use crate::packet_meta;
use crate::types::{CodecResult, Long, ProtocolRead, ProtocolWrite};

pub use clientbound_response::{ClientBoundResponse, ServerStatus};

pub const SERVERBOUND_REQUEST_ID: i32 = 0x00;
pub const SERVERBOUND_PING_ID: i32 = 0x01;
pub const CLIENTBOUND_PONG_ID: i32 = 0x01;

/// Asks for the status document. Has no body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ServerBoundRequest;

impl ProtocolWrite for ServerBoundRequest {
    fn write_to<B: bytes::BufMut>(&self, _buf: &mut B) -> CodecResult<usize> {
        Ok(0)
    }
}

impl ProtocolRead for ServerBoundRequest {
    fn read_from<B: bytes::Buf>(_buf: &mut B) -> CodecResult<(Self, usize)> {
        Ok((ServerBoundRequest, 0))
    }
}

packet_meta!(
    ServerBoundRequest,
    SERVERBOUND_REQUEST_ID,
    Status,
    Serverbound,
    "StatusRequest"
);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerBoundPing {
    pub payload: Long,
}

packet_fields!(ServerBoundPing { payload });
packet_meta!(ServerBoundPing, SERVERBOUND_PING_ID, Status, Serverbound, "StatusPing");

impl ServerBoundPing {
    pub fn new(payload: i64) -> Self {
        Self {
            payload: Long(payload),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientBoundPong {
    pub payload: Long,
}

packet_fields!(ClientBoundPong { payload });
packet_meta!(ClientBoundPong, CLIENTBOUND_PONG_ID, Status, Clientbound, "StatusPong");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet::ServerboundPacket;

    #[test]
    fn test_status_request_is_empty() {
        let raw = ServerBoundRequest.to_raw().unwrap();
        assert_eq!(raw.id, 0x00);
        assert!(raw.body.is_empty());
    }

    #[test]
    fn test_ping_pong_share_payload() {
        let raw = ServerBoundPing::new(0x0102_0304_0506_0708).to_raw().unwrap();
        assert_eq!(raw.id, 0x01);

        let (pong, n) = ClientBoundPong::read_from(&mut raw.body.clone()).unwrap();
        assert_eq!(n, 8);
        assert_eq!(pong.payload.0, 0x0102_0304_0506_0708);
    }
}
