use crate::packet::packet_fields;
use crate::packet_meta;
use crate::types::{ByteArray, ProtocolString};

pub const CLIENTBOUND_ENCRYPTION_REQUEST_ID: i32 = 0x01;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientBoundEncryptionRequest {
    /// Empty on vanilla servers since 1.7.
    pub server_id: ProtocolString,
    /// DER-encoded RSA public key (SubjectPublicKeyInfo).
    pub public_key: ByteArray,
    pub verify_token: ByteArray,
}

packet_fields!(ClientBoundEncryptionRequest {
    server_id,
    public_key,
    verify_token,
});
packet_meta!(
    ClientBoundEncryptionRequest,
    CLIENTBOUND_ENCRYPTION_REQUEST_ID,
    Login,
    Clientbound,
    "EncryptionRequest"
);

impl ClientBoundEncryptionRequest {
    pub fn new(server_id: impl Into<String>, public_key: Vec<u8>, verify_token: Vec<u8>) -> Self {
        Self {
            server_id: ProtocolString(server_id.into()),
            public_key: ByteArray(public_key),
            verify_token: ByteArray(verify_token),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ProtocolRead, ProtocolWrite};
    use bytes::BytesMut;

    #[test]
    fn test_encryption_request() {
        let request = ClientBoundEncryptionRequest::new("", vec![0x30, 0x81, 0x9f], vec![1, 2, 3, 4]);

        let mut buffer = BytesMut::new();
        let written = request.write_to(&mut buffer).unwrap();
        assert_eq!(&buffer[..], &[0x00, 0x03, 0x30, 0x81, 0x9f, 0x04, 1, 2, 3, 4]);

        let (decoded, n) = ClientBoundEncryptionRequest::read_from(&mut buffer.freeze()).unwrap();
        assert_eq!(n, written);
        assert_eq!(decoded, request);
    }
}
