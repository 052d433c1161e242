use std::io::Read;

use bytes::{Buf, BufMut};
use fastnbt::Value;

use super::traits::{ProtocolRead, ProtocolWrite};
use super::{CodecError, CodecResult, ensure_remaining};

/// Named-root NBT compound, kept as an opaque [`fastnbt::Value`].
#[derive(Debug, Clone, PartialEq)]
pub struct Nbt(pub Value);

struct CountingReader<R> {
    inner: R,
    count: usize,
}

impl<R: Read> Read for CountingReader<R> {
    fn read(&mut self, out: &mut [u8]) -> std::io::Result<usize> {
        let n = self.inner.read(out)?;
        self.count += n;
        Ok(n)
    }
}

impl ProtocolWrite for Nbt {
    fn write_to<B: BufMut>(&self, buf: &mut B) -> CodecResult<usize> {
        let encoded = fastnbt::to_bytes(&self.0)
            .map_err(|e| CodecError::invalid_encoding(format!("NBT: {e}")))?;
        buf.put_slice(&encoded);
        Ok(encoded.len())
    }
}

impl ProtocolRead for Nbt {
    fn read_from<B: Buf>(buf: &mut B) -> CodecResult<(Self, usize)> {
        ensure_remaining(buf, 1)?;
        let mut reader = CountingReader {
            inner: (&mut *buf).reader(),
            count: 0,
        };
        let value: Value = fastnbt::from_reader(&mut reader)
            .map_err(|e| CodecError::invalid_encoding(format!("NBT: {e}")))?;
        Ok((Nbt(value), reader.count))
    }
}
