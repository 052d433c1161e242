use uuid::Uuid;

use crate::packet::packet_fields;
use crate::packet_meta;
use crate::types::{ProtocolString, ProtocolUUID};

pub const CLIENTBOUND_LOGIN_SUCCESS_ID: i32 = 0x02;

/// Ends the login phase. For protocol 754 the body is only the UUID and the
/// username; property lists arrived in later versions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientBoundLoginSuccess {
    pub uuid: ProtocolUUID,
    pub username: ProtocolString,
}

packet_fields!(ClientBoundLoginSuccess { uuid, username });
packet_meta!(
    ClientBoundLoginSuccess,
    CLIENTBOUND_LOGIN_SUCCESS_ID,
    Login,
    Clientbound,
    "LoginSuccess"
);

impl ClientBoundLoginSuccess {
    pub fn new(uuid: Uuid, username: impl Into<String>) -> Self {
        Self {
            uuid: ProtocolUUID(uuid),
            username: ProtocolString(username.into()),
        }
    }
}
