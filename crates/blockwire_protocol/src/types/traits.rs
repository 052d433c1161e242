use bytes::{Buf, BufMut, BytesMut};

use super::CodecResult;

/// A value that can be appended to an outgoing packet body.
///
/// Returns the number of bytes written.
pub trait ProtocolWrite {
    fn write_to<B: BufMut>(&self, buf: &mut B) -> CodecResult<usize>;
}

/// A value that can be decoded from the front of a packet body.
///
/// On success the cursor is advanced past the value and the number of
/// consumed bytes is returned alongside it. On failure nothing usable is
/// returned and the cursor position is unspecified.
pub trait ProtocolRead: Sized {
    fn read_from<B: Buf>(buf: &mut B) -> CodecResult<(Self, usize)>;
}

pub trait WriteToBytes {
    fn write_to_bytes(&self, bytes: &mut BytesMut) -> CodecResult<usize>;
}

impl<T: ProtocolWrite> WriteToBytes for T {
    fn write_to_bytes(&self, bytes: &mut BytesMut) -> CodecResult<usize> {
        self.write_to(bytes)
    }
}
