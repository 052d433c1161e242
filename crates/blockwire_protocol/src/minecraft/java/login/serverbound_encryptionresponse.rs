use crate::packet::packet_fields;
use crate::packet_meta;
use crate::types::ByteArray;

pub const SERVERBOUND_ENCRYPTION_RESPONSE_ID: i32 = 0x01;

/// Both fields are RSA-encrypted with the server's public key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerBoundEncryptionResponse {
    pub shared_secret: ByteArray,
    pub verify_token: ByteArray,
}

packet_fields!(ServerBoundEncryptionResponse {
    shared_secret,
    verify_token,
});
packet_meta!(
    ServerBoundEncryptionResponse,
    SERVERBOUND_ENCRYPTION_RESPONSE_ID,
    Login,
    Serverbound,
    "EncryptionResponse"
);

impl ServerBoundEncryptionResponse {
    pub fn new(shared_secret: Vec<u8>, verify_token: Vec<u8>) -> Self {
        Self {
            shared_secret: ByteArray(shared_secret),
            verify_token: ByteArray(verify_token),
        }
    }
}
