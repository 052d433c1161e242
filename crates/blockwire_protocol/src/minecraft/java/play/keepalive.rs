use crate::packet::packet_fields;
use crate::packet_meta;
use crate::types::Long;

pub const CLIENTBOUND_KEEP_ALIVE_ID: i32 = 0x1F;
pub const SERVERBOUND_KEEP_ALIVE_ID: i32 = 0x10;

/// The server kicks clients that do not echo this id within 30 seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientBoundKeepAlive {
    pub keep_alive_id: Long,
}

packet_fields!(ClientBoundKeepAlive { keep_alive_id });
packet_meta!(
    ClientBoundKeepAlive,
    CLIENTBOUND_KEEP_ALIVE_ID,
    Play,
    Clientbound,
    "KeepAlive"
);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerBoundKeepAlive {
    pub keep_alive_id: Long,
}

packet_fields!(ServerBoundKeepAlive { keep_alive_id });
packet_meta!(
    ServerBoundKeepAlive,
    SERVERBOUND_KEEP_ALIVE_ID,
    Play,
    Serverbound,
    "KeepAlive"
);

impl ServerBoundKeepAlive {
    pub fn echo(request: &ClientBoundKeepAlive) -> Self {
        Self {
            keep_alive_id: request.keep_alive_id,
        }
    }
}
