use bytes::{Buf, BufMut, Bytes};

use super::traits::{ProtocolRead, ProtocolWrite};
use super::var_numbers::VarInt;
use super::{CodecError, CodecResult, ensure_remaining};

/// Reads a VarInt length prefix and rejects negative values.
fn read_length<B: Buf>(buf: &mut B, what: &str) -> CodecResult<(usize, usize)> {
    let (VarInt(length), n) = VarInt::read_from(buf)?;
    if length < 0 {
        return Err(CodecError::invalid_encoding(format!(
            "{what} length cannot be negative ({length})"
        )));
    }
    Ok((length as usize, n))
}

/// VarInt-prefixed run of raw bytes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ByteArray(pub Vec<u8>);

impl ProtocolWrite for ByteArray {
    fn write_to<B: BufMut>(&self, buf: &mut B) -> CodecResult<usize> {
        let mut written = VarInt(self.0.len() as i32).write_to(buf)?;
        buf.put_slice(&self.0);
        written += self.0.len();
        Ok(written)
    }
}

impl ProtocolRead for ByteArray {
    fn read_from<B: Buf>(buf: &mut B) -> CodecResult<(Self, usize)> {
        let (length, mut bytes_read) = read_length(buf, "ByteArray")?;
        ensure_remaining(buf, length)?;
        let mut data = vec![0u8; length];
        buf.copy_to_slice(&mut data);
        bytes_read += length;
        Ok((ByteArray(data), bytes_read))
    }
}

/// VarInt-prefixed sequence of any codec type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PrefixedArray<T>(pub Vec<T>);

impl<T: ProtocolWrite> ProtocolWrite for PrefixedArray<T> {
    fn write_to<B: BufMut>(&self, buf: &mut B) -> CodecResult<usize> {
        let mut written = VarInt(self.0.len() as i32).write_to(buf)?;
        for item in &self.0 {
            written += item.write_to(buf)?;
        }
        Ok(written)
    }
}

impl<T: ProtocolRead> ProtocolRead for PrefixedArray<T> {
    fn read_from<B: Buf>(buf: &mut B) -> CodecResult<(Self, usize)> {
        let (length, mut bytes_read) = read_length(buf, "PrefixedArray")?;
        // Every element takes at least one byte, so a larger count cannot be honest.
        ensure_remaining(buf, length)?;

        let mut items = Vec::with_capacity(length);
        for _ in 0..length {
            let (item, n) = T::read_from(buf)?;
            bytes_read += n;
            items.push(item);
        }

        Ok((PrefixedArray(items), bytes_read))
    }
}

/// Everything left in the packet body, without a length prefix.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RemainingBytes(pub Bytes);

impl ProtocolWrite for RemainingBytes {
    fn write_to<B: BufMut>(&self, buf: &mut B) -> CodecResult<usize> {
        buf.put_slice(&self.0);
        Ok(self.0.len())
    }
}

impl ProtocolRead for RemainingBytes {
    fn read_from<B: Buf>(buf: &mut B) -> CodecResult<(Self, usize)> {
        let n = buf.remaining();
        Ok((RemainingBytes(buf.copy_to_bytes(n)), n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::primitives::Int;
    use crate::types::strings::ProtocolString;
    use bytes::BytesMut;

    #[test]
    fn test_byte_array() {
        let byte_array = ByteArray(vec![1, 2, 3, 4, 5]);

        let mut buffer = BytesMut::new();
        let written = byte_array.write_to(&mut buffer).unwrap();
        assert_eq!(written, 6);

        let (read_array, read) = ByteArray::read_from(&mut buffer.freeze()).unwrap();
        assert_eq!(written, read);
        assert_eq!(byte_array, read_array);
    }

    #[test]
    fn test_byte_array_truncated() {
        let mut bytes = Bytes::from_static(&[0x04, 1, 2]);
        assert!(matches!(
            ByteArray::read_from(&mut bytes),
            Err(CodecError::BufferUnderrun {
                needed: 4,
                remaining: 2
            })
        ));
    }

    #[test]
    fn test_prefixed_array() {
        let ints = PrefixedArray(vec![Int(1), Int(-1), Int(i32::MAX)]);
        let names = PrefixedArray(vec![
            ProtocolString::from("minecraft:overworld"),
            ProtocolString::from("minecraft:the_nether"),
        ]);

        let mut buffer = BytesMut::new();
        let mut written = ints.write_to(&mut buffer).unwrap();
        written += names.write_to(&mut buffer).unwrap();

        let mut bytes = buffer.freeze();
        let (read_ints, a) = PrefixedArray::<Int>::read_from(&mut bytes).unwrap();
        let (read_names, b) = PrefixedArray::<ProtocolString>::read_from(&mut bytes).unwrap();

        assert_eq!(a + b, written);
        assert_eq!(read_ints, ints);
        assert_eq!(read_names, names);
    }

    #[test]
    fn test_prefixed_array_impossible_count() {
        let mut bytes = Bytes::from_static(&[0x7f, 0x00]);
        assert!(PrefixedArray::<Int>::read_from(&mut bytes).is_err());
    }

    #[test]
    fn test_remaining_bytes() {
        let mut bytes = Bytes::from_static(&[9, 8, 7]);
        let (rest, n) = RemainingBytes::read_from(&mut bytes).unwrap();
        assert_eq!(n, 3);
        assert_eq!(&rest.0[..], &[9, 8, 7]);
        assert!(bytes.is_empty());
    }
}
