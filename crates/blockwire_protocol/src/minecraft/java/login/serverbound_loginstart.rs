use crate::packet::packet_fields;
use crate::packet_meta;
use crate::types::ProtocolString;

pub const SERVERBOUND_LOGIN_START_ID: i32 = 0x00;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerBoundLoginStart {
    pub name: ProtocolString,
}

packet_fields!(ServerBoundLoginStart { name });
packet_meta!(
    ServerBoundLoginStart,
    SERVERBOUND_LOGIN_START_ID,
    Login,
    Serverbound,
    "LoginStart"
);

impl ServerBoundLoginStart {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: ProtocolString(name.into()),
        }
    }
}
