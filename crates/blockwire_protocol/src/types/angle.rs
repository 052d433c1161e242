use bytes::{Buf, BufMut};

use super::traits::{ProtocolRead, ProtocolWrite};
use super::{CodecResult, ensure_remaining};

const FULL_ROTATION: f32 = 256.0;

/// A rotation in steps of 1/256 of a full turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Angle(pub u8);

impl Angle {
    pub fn from_degrees(degrees: f32) -> Self {
        let normalized = degrees.rem_euclid(360.0);
        Angle(((normalized * FULL_ROTATION / 360.0).round() as u32 % 256) as u8)
    }

    pub fn to_degrees(&self) -> f32 {
        f32::from(self.0) * 360.0 / FULL_ROTATION
    }
}

impl ProtocolWrite for Angle {
    fn write_to<B: BufMut>(&self, buf: &mut B) -> CodecResult<usize> {
        buf.put_u8(self.0);
        Ok(1)
    }
}

impl ProtocolRead for Angle {
    fn read_from<B: Buf>(buf: &mut B) -> CodecResult<(Self, usize)> {
        ensure_remaining(buf, 1)?;
        Ok((Angle(buf.get_u8()), 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angle_conversions() {
        assert_eq!(Angle::from_degrees(0.0), Angle(0));
        assert_eq!(Angle::from_degrees(90.0), Angle(64));
        assert_eq!(Angle::from_degrees(180.0), Angle(128));
        assert_eq!(Angle::from_degrees(-90.0), Angle(192));
        assert_eq!(Angle::from_degrees(360.0), Angle(0));
        assert_eq!(Angle::from_degrees(359.9), Angle(0));

        assert_eq!(Angle(64).to_degrees(), 90.0);
        assert_eq!(Angle(192).to_degrees(), 270.0);
    }
}
