use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::VarInt;

/// Protocol version numbers sent in the handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProtocolVersion(i32);

impl ProtocolVersion {
    /// Protocol version for Minecraft 1.16.4
    pub const V1_16_4: ProtocolVersion = ProtocolVersion(754);
    /// Protocol version for Minecraft 1.16.5 (same wire protocol as 1.16.4)
    pub const V1_16_5: ProtocolVersion = ProtocolVersion(754);

    /// The only version whose packet table ships with this crate.
    pub const SUPPORTED: ProtocolVersion = Self::V1_16_5;

    pub const fn new(protocol: i32) -> Self {
        ProtocolVersion(protocol)
    }

    pub const fn protocol_number(&self) -> i32 {
        self.0
    }

    pub fn name(&self) -> &'static str {
        match self.0 {
            754 => "1.16.5",
            _ => "Unknown Version",
        }
    }

    pub fn is_supported(&self) -> bool {
        *self == Self::SUPPORTED
    }

    pub fn to_varint(&self) -> VarInt {
        VarInt(self.0)
    }
}

impl Default for ProtocolVersion {
    fn default() -> Self {
        Self::SUPPORTED
    }
}

impl From<i32> for ProtocolVersion {
    fn from(protocol: i32) -> Self {
        ProtocolVersion(protocol)
    }
}

impl From<ProtocolVersion> for i32 {
    fn from(version: ProtocolVersion) -> Self {
        version.0
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_constants() {
        assert_eq!(ProtocolVersion::V1_16_4, ProtocolVersion::V1_16_5);
        assert_eq!(ProtocolVersion::default().protocol_number(), 754);
        assert!(ProtocolVersion::new(754).is_supported());
        assert!(!ProtocolVersion::new(758).is_supported());
        assert_eq!(ProtocolVersion::new(1).name(), "Unknown Version");
        assert_eq!(ProtocolVersion::SUPPORTED.to_string(), "1.16.5 (754)");
    }
}
