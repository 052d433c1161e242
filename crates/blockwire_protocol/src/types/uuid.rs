use bytes::{Buf, BufMut};
use uuid::Uuid;

use super::traits::{ProtocolRead, ProtocolWrite};
use super::{CodecResult, ensure_remaining};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProtocolUUID(pub Uuid);

impl ProtocolWrite for ProtocolUUID {
    fn write_to<B: BufMut>(&self, buf: &mut B) -> CodecResult<usize> {
        buf.put_slice(self.0.as_bytes());
        Ok(16)
    }
}

impl ProtocolRead for ProtocolUUID {
    fn read_from<B: Buf>(buf: &mut B) -> CodecResult<(Self, usize)> {
        ensure_remaining(buf, 16)?;
        let mut raw = [0u8; 16];
        buf.copy_to_slice(&mut raw);
        Ok((ProtocolUUID(Uuid::from_bytes(raw)), 16))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::{Bytes, BytesMut};

    #[test]
    fn test_uuid_protocol() {
        let test_cases = vec![
            Uuid::nil(),
            Uuid::new_v4(),
            Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap(),
        ];

        for uuid in test_cases {
            let mut buffer = BytesMut::new();
            let written = ProtocolUUID(uuid).write_to(&mut buffer).unwrap();
            assert_eq!(written, 16);

            let (read, n) = ProtocolUUID::read_from(&mut buffer.freeze()).unwrap();
            assert_eq!(n, 16);
            assert_eq!(read.0, uuid);
        }
    }

    #[test]
    fn test_uuid_short_buffer() {
        let mut bytes = Bytes::from_static(&[0u8; 15]);
        assert!(ProtocolUUID::read_from(&mut bytes).is_err());
    }
}
