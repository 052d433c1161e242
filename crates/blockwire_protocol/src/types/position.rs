use bytes::{Buf, BufMut};

use super::traits::{ProtocolRead, ProtocolWrite};
use super::{CodecError, CodecResult, ensure_remaining};

const XZ_MASK: i64 = 0x3FF_FFFF;
const Y_MASK: i64 = 0xFFF;

/// Block coordinates packed into one 64-bit word: x in the top 26 bits,
/// z in the next 26 and y in the low 12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Position {
    pub const XZ_RANGE: std::ops::Range<i32> = -(1 << 25)..(1 << 25);
    pub const Y_RANGE: std::ops::Range<i32> = -(1 << 11)..(1 << 11);

    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Position { x, y, z }
    }

    pub fn is_encodable(&self) -> bool {
        Self::XZ_RANGE.contains(&self.x)
            && Self::XZ_RANGE.contains(&self.z)
            && Self::Y_RANGE.contains(&self.y)
    }

    pub fn encode(&self) -> i64 {
        ((i64::from(self.x) & XZ_MASK) << 38)
            | ((i64::from(self.z) & XZ_MASK) << 12)
            | (i64::from(self.y) & Y_MASK)
    }

    pub fn decode(value: i64) -> Self {
        // Arithmetic shifts sign-extend each field.
        let x = (value >> 38) as i32;
        let y = ((value << 52) >> 52) as i32;
        let z = ((value << 26) >> 38) as i32;
        Position { x, y, z }
    }
}

impl ProtocolWrite for Position {
    fn write_to<B: BufMut>(&self, buf: &mut B) -> CodecResult<usize> {
        if !self.is_encodable() {
            return Err(CodecError::invalid_encoding(format!(
                "position {self:?} outside the packable range"
            )));
        }
        buf.put_i64(self.encode());
        Ok(8)
    }
}

impl ProtocolRead for Position {
    fn read_from<B: Buf>(buf: &mut B) -> CodecResult<(Self, usize)> {
        ensure_remaining(buf, 8)?;
        Ok((Position::decode(buf.get_i64()), 8))
    }
}
