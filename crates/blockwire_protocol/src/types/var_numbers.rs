use bytes::{Buf, BufMut, BytesMut};

use super::traits::{ProtocolRead, ProtocolWrite};
use super::{CodecError, CodecResult, ensure_remaining};

const SEGMENT_BITS: u8 = 0x7F;
const CONTINUE_BIT: u8 = 0x80;

pub const VARINT_MAX_BYTES: usize = 5;
pub const VARLONG_MAX_BYTES: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarInt(pub i32);

impl VarInt {
    /// Encoded size in bytes. Negative values always take five bytes.
    pub fn len(&self) -> usize {
        let value = self.0 as u32;
        if value == 0 {
            return 1;
        }
        let bits = 32 - value.leading_zeros() as usize;
        bits.div_ceil(7)
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn to_bytes(&self) -> BytesMut {
        let mut buffer = BytesMut::with_capacity(VARINT_MAX_BYTES);
        put_varint(&mut buffer, self.0);
        buffer
    }
}

fn put_varint<B: BufMut>(buf: &mut B, value: i32) -> usize {
    let mut value = value as u32;
    let mut written = 0;

    loop {
        let mut byte = (value & u32::from(SEGMENT_BITS)) as u8;
        value >>= 7;

        if value != 0 {
            byte |= CONTINUE_BIT;
        }

        buf.put_u8(byte);
        written += 1;

        if value == 0 {
            break;
        }
    }

    written
}

impl ProtocolWrite for VarInt {
    fn write_to<B: BufMut>(&self, buf: &mut B) -> CodecResult<usize> {
        Ok(put_varint(buf, self.0))
    }
}

impl ProtocolRead for VarInt {
    fn read_from<B: Buf>(buf: &mut B) -> CodecResult<(Self, usize)> {
        let mut value: u32 = 0;
        let mut bytes_read = 0;

        loop {
            if bytes_read >= VARINT_MAX_BYTES {
                return Err(CodecError::MalformedVarInt {
                    max_bytes: VARINT_MAX_BYTES,
                });
            }

            ensure_remaining(buf, 1)?;
            let byte = buf.get_u8();
            value |= u32::from(byte & SEGMENT_BITS) << (7 * bytes_read);
            bytes_read += 1;

            if byte & CONTINUE_BIT == 0 {
                break;
            }
        }

        Ok((VarInt(value as i32), bytes_read))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarLong(pub i64);

impl VarLong {
    pub fn len(&self) -> usize {
        let value = self.0 as u64;
        if value == 0 {
            return 1;
        }
        let bits = 64 - value.leading_zeros() as usize;
        bits.div_ceil(7)
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl ProtocolWrite for VarLong {
    fn write_to<B: BufMut>(&self, buf: &mut B) -> CodecResult<usize> {
        let mut value = self.0 as u64;
        let mut written = 0;

        loop {
            let mut byte = (value & u64::from(SEGMENT_BITS)) as u8;
            value >>= 7;

            if value != 0 {
                byte |= CONTINUE_BIT;
            }

            buf.put_u8(byte);
            written += 1;

            if value == 0 {
                break;
            }
        }

        Ok(written)
    }
}

impl ProtocolRead for VarLong {
    fn read_from<B: Buf>(buf: &mut B) -> CodecResult<(Self, usize)> {
        let mut value: u64 = 0;
        let mut bytes_read = 0;

        loop {
            if bytes_read >= VARLONG_MAX_BYTES {
                return Err(CodecError::MalformedVarInt {
                    max_bytes: VARLONG_MAX_BYTES,
                });
            }

            ensure_remaining(buf, 1)?;
            let byte = buf.get_u8();
            value |= u64::from(byte & SEGMENT_BITS) << (7 * bytes_read);
            bytes_read += 1;

            if byte & CONTINUE_BIT == 0 {
                break;
            }
        }

        Ok((VarLong(value as i64), bytes_read))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn roundtrip(value: i32) {
        let varint = VarInt(value);
        let mut buffer = BytesMut::new();
        let written = varint.write_to(&mut buffer).unwrap();
        assert_eq!(written, varint.len());

        let mut bytes = buffer.freeze();
        let (read_varint, read) = VarInt::read_from(&mut bytes).unwrap();
        assert_eq!(written, read);
        assert_eq!(varint, read_varint);
        assert!(bytes.is_empty());
    }

    #[test]
    fn test_varint_write_read() {
        for value in [0, 1, 127, 128, 255, 25565, 2_097_151, 2_097_152, i32::MAX] {
            roundtrip(value);
        }
        for value in [-1, -127, i32::MIN] {
            roundtrip(value);
        }
    }

    #[test]
    fn test_varint_unsigned_domain() {
        // Sample the whole u32 range, including every power-of-two boundary.
        let mut samples: Vec<u32> = (0..32).flat_map(|s| [1u32 << s, (1u32 << s) - 1]).collect();
        samples.extend([u32::MAX, u32::MAX - 1, 0xDEAD_BEEF, 0x8000_0001]);

        for n in samples {
            let mut buffer = BytesMut::new();
            VarInt(n as i32).write_to(&mut buffer).unwrap();
            let (VarInt(read), _) = VarInt::read_from(&mut buffer.freeze()).unwrap();
            assert_eq!(read as u32, n);
        }
    }

    #[test]
    fn test_known_encodings() {
        let cases: [(i32, &[u8]); 7] = [
            (0, &[0x00]),
            (1, &[0x01]),
            (128, &[0x80, 0x01]),
            (25565, &[0xdd, 0xc7, 0x01]),
            (2_147_483_647, &[0xff, 0xff, 0xff, 0xff, 0x07]),
            (-1, &[0xff, 0xff, 0xff, 0xff, 0x0f]),
            (-2_147_483_648, &[0x80, 0x80, 0x80, 0x80, 0x08]),
        ];

        for (value, expected) in cases {
            assert_eq!(&VarInt(value).to_bytes()[..], expected, "encoding {value}");
        }
    }

    #[test]
    fn test_varint_len() {
        assert_eq!(VarInt(0).len(), 1);
        assert_eq!(VarInt(127).len(), 1);
        assert_eq!(VarInt(128).len(), 2);
        assert_eq!(VarInt(16_384).len(), 3);
        assert_eq!(VarInt(268_435_456).len(), 5);
        assert_eq!(VarInt(-1).len(), 5);
    }

    #[test]
    fn test_varint_too_long() {
        let mut bytes = Bytes::from_static(&[0x80, 0x80, 0x80, 0x80, 0x80, 0x01]);
        let result = VarInt::read_from(&mut bytes);
        assert_eq!(result, Err(CodecError::MalformedVarInt { max_bytes: 5 }));
    }

    #[test]
    fn test_varint_truncated() {
        let mut bytes = Bytes::from_static(&[0x80, 0x80]);
        let result = VarInt::read_from(&mut bytes);
        assert!(matches!(result, Err(CodecError::BufferUnderrun { .. })));
    }

    #[test]
    fn test_varlong_write_read() {
        for value in [0i64, 1, 300, i64::from(i32::MAX) + 1, i64::MAX, -1, i64::MIN] {
            let mut buffer = BytesMut::new();
            let written = VarLong(value).write_to(&mut buffer).unwrap();
            assert_eq!(written, VarLong(value).len());

            let (read, n) = VarLong::read_from(&mut buffer.freeze()).unwrap();
            assert_eq!(read.0, value);
            assert_eq!(n, written);
        }
    }

    #[test]
    fn test_varlong_too_long() {
        let mut bytes = Bytes::from(vec![0x80u8; 11]);
        assert_eq!(
            VarLong::read_from(&mut bytes),
            Err(CodecError::MalformedVarInt { max_bytes: 10 })
        );
    }
}
