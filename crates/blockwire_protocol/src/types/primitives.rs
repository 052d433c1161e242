use bytes::{Buf, BufMut};

use super::traits::{ProtocolRead, ProtocolWrite};
use super::{CodecResult, ensure_remaining};

// Boolean type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boolean(pub bool);

impl ProtocolWrite for Boolean {
    fn write_to<B: BufMut>(&self, buf: &mut B) -> CodecResult<usize> {
        buf.put_u8(if self.0 { 0x01 } else { 0x00 });
        Ok(1)
    }
}

impl ProtocolRead for Boolean {
    fn read_from<B: Buf>(buf: &mut B) -> CodecResult<(Self, usize)> {
        ensure_remaining(buf, 1)?;
        Ok((Boolean(buf.get_u8() != 0), 1))
    }
}

/// Fixed-width big-endian numbers all share the same shape; only the
/// `bytes` accessor pair and the width differ.
macro_rules! fixed_width {
    ($(#[$meta:meta])* $name:ident, $inner:ty, $width:expr, $put:ident, $get:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub struct $name(pub $inner);

        impl ProtocolWrite for $name {
            fn write_to<B: BufMut>(&self, buf: &mut B) -> CodecResult<usize> {
                buf.$put(self.0);
                Ok($width)
            }
        }

        impl ProtocolRead for $name {
            fn read_from<B: Buf>(buf: &mut B) -> CodecResult<(Self, usize)> {
                ensure_remaining(buf, $width)?;
                Ok(($name(buf.$get()), $width))
            }
        }
    };
}

fixed_width!(
    /// Signed 8-bit.
    Byte, i8, 1, put_i8, get_i8
);
fixed_width!(UnsignedByte, u8, 1, put_u8, get_u8);
fixed_width!(Short, i16, 2, put_i16, get_i16);
fixed_width!(
    /// Used by the handshake for the server port.
    UnsignedShort, u16, 2, put_u16, get_u16
);
fixed_width!(Int, i32, 4, put_i32, get_i32);
fixed_width!(Long, i64, 8, put_i64, get_i64);
fixed_width!(Float, f32, 4, put_f32, get_f32);
fixed_width!(Double, f64, 8, put_f64, get_f64);

impl Eq for Byte {}
impl Eq for UnsignedByte {}
impl Eq for Short {}
impl Eq for UnsignedShort {}
impl Eq for Int {}
impl Eq for Long {}
