use bytes::{Buf, BufMut};

use super::traits::{ProtocolRead, ProtocolWrite};
use super::var_numbers::VarInt;
use super::{CodecError, CodecResult};

/// Longest string the protocol allows, counted in UTF-16 code units.
pub const MAX_STRING_UNITS: usize = 32767;

/// VarInt-prefixed UTF-8 string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ProtocolString(pub String);

impl ProtocolString {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProtocolString {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ProtocolString {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl ProtocolWrite for ProtocolString {
    fn write_to<B: BufMut>(&self, buf: &mut B) -> CodecResult<usize> {
        let units = self.0.encode_utf16().count();
        if units > MAX_STRING_UNITS {
            return Err(CodecError::InvalidEncoding(format!(
                "string of {units} UTF-16 units exceeds {MAX_STRING_UNITS}"
            )));
        }

        let bytes = self.0.as_bytes();
        let mut written = VarInt(bytes.len() as i32).write_to(buf)?;
        buf.put_slice(bytes);
        written += bytes.len();
        Ok(written)
    }
}

impl ProtocolRead for ProtocolString {
    fn read_from<B: Buf>(buf: &mut B) -> CodecResult<(Self, usize)> {
        let (VarInt(length), mut bytes_read) = VarInt::read_from(buf)?;
        if length < 0 {
            return Err(CodecError::invalid_encoding(format!(
                "negative string length {length}"
            )));
        }

        let length = length as usize;
        if length > buf.remaining() {
            return Err(CodecError::invalid_encoding(format!(
                "string length {length} exceeds remaining {} bytes",
                buf.remaining()
            )));
        }

        let mut raw = vec![0u8; length];
        buf.copy_to_slice(&mut raw);
        bytes_read += length;

        let value = String::from_utf8(raw)
            .map_err(|e| CodecError::invalid_encoding(format!("invalid UTF-8: {e}")))?;

        Ok((ProtocolString(value), bytes_read))
    }
}

/// Namespaced key such as `minecraft:overworld`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    pub namespace: String,
    pub path: String,
}

impl Identifier {
    pub const DEFAULT_NAMESPACE: &'static str = "minecraft";

    pub fn parse(value: &str) -> Self {
        match value.split_once(':') {
            Some((namespace, path)) => Self {
                namespace: namespace.to_string(),
                path: path.to_string(),
            },
            None => Self {
                namespace: Self::DEFAULT_NAMESPACE.to_string(),
                path: value.to_string(),
            },
        }
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl ProtocolWrite for Identifier {
    fn write_to<B: BufMut>(&self, buf: &mut B) -> CodecResult<usize> {
        ProtocolString(self.to_string()).write_to(buf)
    }
}

impl ProtocolRead for Identifier {
    fn read_from<B: Buf>(buf: &mut B) -> CodecResult<(Self, usize)> {
        let (ProtocolString(raw), n) = ProtocolString::read_from(buf)?;
        Ok((Identifier::parse(&raw), n))
    }
}
