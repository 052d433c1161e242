//! Wire-level building blocks: every field type a packet body is made of.

use bytes::Buf;
use thiserror::Error;

pub mod angle;
pub mod arrays;
pub mod nbt;
pub mod position;
pub mod primitives;
pub mod strings;
pub mod traits;
pub mod uuid;
pub mod var_numbers;

pub use angle::Angle;
pub use arrays::{ByteArray, PrefixedArray, RemainingBytes};
pub use nbt::Nbt;
pub use position::Position;
pub use primitives::{
    Boolean, Byte, Double, Float, Int, Long, Short, UnsignedByte, UnsignedShort,
};
pub use strings::{Identifier, ProtocolString};
pub use traits::{ProtocolRead, ProtocolWrite, WriteToBytes};
pub use uuid::ProtocolUUID;
pub use var_numbers::{VarInt, VarLong};

/// Errors raised while reading or writing a single field.
///
/// All of them are scoped to the packet being decoded; none of them says
/// anything about the health of the underlying stream.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Buffer underrun: needed {needed} bytes, {remaining} remaining")]
    BufferUnderrun { needed: usize, remaining: usize },

    #[error("Malformed variable-length number (longer than {max_bytes} bytes)")]
    MalformedVarInt { max_bytes: usize },

    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),
}

impl CodecError {
    pub fn invalid_encoding(msg: impl Into<String>) -> Self {
        Self::InvalidEncoding(msg.into())
    }
}

pub type CodecResult<T> = std::result::Result<T, CodecError>;

/// Fails with [`CodecError::BufferUnderrun`] unless `needed` bytes are left.
#[inline]
pub(crate) fn ensure_remaining<B: Buf>(buf: &B, needed: usize) -> CodecResult<()> {
    let remaining = buf.remaining();
    if remaining < needed {
        return Err(CodecError::BufferUnderrun { needed, remaining });
    }
    Ok(())
}
