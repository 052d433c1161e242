//! Protocol phases, packet traits and framing-level errors.

use std::fmt;
use std::io;

use bytes::{Bytes, BytesMut};
use thiserror::Error;

use crate::types::{CodecError, CodecResult, ProtocolRead, ProtocolWrite, VarInt};

/// Largest frame accepted from the wire (2 MiB).
pub const MAX_FRAME_LENGTH: usize = 2 * 1024 * 1024;
/// Largest payload accepted after inflating a compressed frame (8 MiB).
pub const MAX_UNCOMPRESSED_LENGTH: usize = 8 * 1024 * 1024;

/// Error type for framing, compression and encryption.
///
/// Unlike [`CodecError`], most of these leave the byte stream in a state
/// that cannot be resynchronised.
#[derive(Error, Debug)]
pub enum PacketError {
    #[error("IO Error: {0}")]
    Io(#[from] io::Error),

    #[error("Compression error: {0}")]
    Compression(String),

    #[error("Encryption error: {0}")]
    Encryption(String),

    #[error("Invalid packet length: {length} (max: {max})")]
    InvalidLength { length: usize, max: usize },

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("Unsupported protocol version: {0}")]
    UnsupportedProtocol(i32),

    #[error("{0}")]
    Other(String),
}

impl PacketError {
    /// Returns the kind of error, similar to how std::io::Error works
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            PacketError::Io(e) => e.kind(),
            PacketError::Compression(_) => io::ErrorKind::InvalidData,
            PacketError::Encryption(_) => io::ErrorKind::InvalidData,
            PacketError::InvalidLength { .. } => io::ErrorKind::InvalidInput,
            PacketError::Codec(_) => io::ErrorKind::InvalidData,
            PacketError::UnsupportedProtocol(_) => io::ErrorKind::Unsupported,
            PacketError::Other(_) => io::ErrorKind::Other,
        }
    }

    /// Whether the stream has ended, as opposed to carrying bad data.
    pub fn is_eof(&self) -> bool {
        matches!(
            self.kind(),
            io::ErrorKind::UnexpectedEof
                | io::ErrorKind::ConnectionReset
                | io::ErrorKind::ConnectionAborted
                | io::ErrorKind::BrokenPipe
        )
    }
}

impl From<PacketError> for io::Error {
    fn from(err: PacketError) -> Self {
        match err {
            PacketError::Io(e) => e,
            other => io::Error::new(other.kind(), other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, PacketError>;

/// Protocol phase of a connection.
///
/// The phase selects which partition of the packet registry is used to
/// interpret incoming ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionState {
    Idle,
    Handshaking,
    Status,
    Login,
    Play,
    Closed,
}

impl ConnectionState {
    /// Handshake `next_state` value for the status phase.
    pub const INTENT_STATUS: i32 = 1;
    /// Handshake `next_state` value for the login phase.
    pub const INTENT_LOGIN: i32 = 2;

    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionState::Idle => "idle",
            ConnectionState::Handshaking => "handshaking",
            ConnectionState::Status => "status",
            ConnectionState::Login => "login",
            ConnectionState::Play => "play",
            ConnectionState::Closed => "closed",
        }
    }

    /// Forward-only transition table. `Closed` is reachable from anywhere.
    pub fn can_transition_to(&self, next: ConnectionState) -> bool {
        use ConnectionState::*;
        matches!(
            (self, next),
            (_, Closed) | (Idle, Handshaking) | (Handshaking, Status | Login) | (Login, Play)
        )
    }

    /// Transport is gone or not yet opened.
    pub fn is_disconnected(&self) -> bool {
        matches!(self, ConnectionState::Idle | ConnectionState::Closed)
    }

    /// Handshake sent and one of the three active phases reached.
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            ConnectionState::Status | ConnectionState::Login | ConnectionState::Play
        )
    }

    /// The value written into the handshake for this target phase.
    pub fn handshake_intent(&self) -> Option<i32> {
        match self {
            ConnectionState::Status => Some(Self::INTENT_STATUS),
            ConnectionState::Login => Some(Self::INTENT_LOGIN),
            _ => None,
        }
    }

    pub fn from_handshake_intent(intent: i32) -> Option<Self> {
        match intent {
            Self::INTENT_STATUS => Some(ConnectionState::Status),
            Self::INTENT_LOGIN => Some(ConnectionState::Login),
            _ => None,
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Serverbound,
    Clientbound,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Serverbound => f.write_str("serverbound"),
            Direction::Clientbound => f.write_str("clientbound"),
        }
    }
}

/// Compression state of a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionState {
    #[default]
    Disabled,
    Enabled { threshold: i32 },
}

impl CompressionState {
    /// Negative thresholds switch compression off.
    pub fn from_threshold(threshold: i32) -> Self {
        if threshold < 0 {
            CompressionState::Disabled
        } else {
            CompressionState::Enabled { threshold }
        }
    }

    pub fn threshold(&self) -> Option<i32> {
        match self {
            CompressionState::Disabled => None,
            CompressionState::Enabled { threshold } => Some(*threshold),
        }
    }
}

/// One decrypted, decompressed frame: the packet id and its undecoded body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPacket {
    pub id: i32,
    pub body: Bytes,
}

impl RawPacket {
    pub fn new(id: i32, body: impl Into<Bytes>) -> Self {
        Self {
            id,
            body: body.into(),
        }
    }

    /// Splits `varint(id) payload` into its two parts.
    pub fn from_frame_data(mut data: Bytes) -> CodecResult<Self> {
        let (VarInt(id), _) = VarInt::read_from(&mut data)?;
        Ok(Self { id, body: data })
    }

    /// `varint(id) payload`, ready to be compressed and length-prefixed.
    pub fn to_frame_data(&self) -> BytesMut {
        let mut out = BytesMut::with_capacity(self.body.len() + 5);
        out.extend_from_slice(&VarInt(self.id).to_bytes());
        out.extend_from_slice(&self.body);
        out
    }

    pub fn len(&self) -> usize {
        VarInt(self.id).len() + self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Static metadata and body codec of a protocol packet.
pub trait Packet: ProtocolRead + ProtocolWrite + fmt::Debug + Send + Sync + 'static {
    const ID: i32;
    const STATE: ConnectionState;
    const DIRECTION: Direction;
    const NAME: &'static str;
}

/// A packet the client sends.
///
/// The connection refuses to send it unless [`Packet::STATE`] matches the
/// current phase.
pub trait ServerboundPacket: Packet {
    fn to_raw(&self) -> CodecResult<RawPacket> {
        let mut body = BytesMut::new();
        self.write_to(&mut body)?;
        Ok(RawPacket::new(Self::ID, body.freeze()))
    }
}

/// Declares a packet's metadata and, for serverbound packets, the
/// [`ServerboundPacket`] marker.
#[macro_export]
macro_rules! packet_meta {
    ($ty:ty, $id:expr, $state:ident, Serverbound, $name:literal) => {
        impl $crate::packet::Packet for $ty {
            const ID: i32 = $id;
            const STATE: $crate::packet::ConnectionState = $crate::packet::ConnectionState::$state;
            const DIRECTION: $crate::packet::Direction = $crate::packet::Direction::Serverbound;
            const NAME: &'static str = $name;
        }

        impl $crate::packet::ServerboundPacket for $ty {}
    };
    ($ty:ty, $id:expr, $state:ident, Clientbound, $name:literal) => {
        impl $crate::packet::Packet for $ty {
            const ID: i32 = $id;
            const STATE: $crate::packet::ConnectionState = $crate::packet::ConnectionState::$state;
            const DIRECTION: $crate::packet::Direction = $crate::packet::Direction::Clientbound;
            const NAME: &'static str = $name;
        }
    };
}

/// Field-by-field body codec for packets whose wire layout is exactly their
/// struct layout, in declaration order.
macro_rules! packet_fields {
    ($ty:ident { $($field:ident),+ $(,)? }) => {
        impl $crate::types::ProtocolWrite for $ty {
            fn write_to<B: ::bytes::BufMut>(
                &self,
                buf: &mut B,
            ) -> $crate::types::CodecResult<usize> {
                let mut written = 0;
                $( written += $crate::types::ProtocolWrite::write_to(&self.$field, buf)?; )+
                Ok(written)
            }
        }

        impl $crate::types::ProtocolRead for $ty {
            fn read_from<B: ::bytes::Buf>(
                buf: &mut B,
            ) -> $crate::types::CodecResult<(Self, usize)> {
                let mut bytes_read = 0;
                $(
                    let ($field, n) = $crate::types::ProtocolRead::read_from(buf)?;
                    bytes_read += n;
                )+
                Ok((Self { $($field),+ }, bytes_read))
            }
        }
    };
}

pub(crate) use packet_fields;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_transitions() {
        use ConnectionState::*;

        assert!(Idle.can_transition_to(Handshaking));
        assert!(Handshaking.can_transition_to(Status));
        assert!(Handshaking.can_transition_to(Login));
        assert!(Login.can_transition_to(Play));

        for state in [Idle, Handshaking, Status, Login, Play, Closed] {
            assert!(state.can_transition_to(Closed), "{state} -> closed");
        }

        assert!(!Status.can_transition_to(Login));
        assert!(!Play.can_transition_to(Login));
        assert!(!Idle.can_transition_to(Play));
        assert!(!Closed.can_transition_to(Idle));
        assert!(!Handshaking.can_transition_to(Play));
    }

    #[test]
    fn test_state_groups() {
        assert!(ConnectionState::Idle.is_disconnected());
        assert!(ConnectionState::Closed.is_disconnected());
        assert!(!ConnectionState::Handshaking.is_active());
        assert!(ConnectionState::Play.is_active());
        assert_eq!(ConnectionState::Login.handshake_intent(), Some(2));
        assert_eq!(ConnectionState::Play.handshake_intent(), None);
        assert_eq!(
            ConnectionState::from_handshake_intent(1),
            Some(ConnectionState::Status)
        );
    }

    #[test]
    fn test_compression_threshold() {
        assert_eq!(CompressionState::from_threshold(-1), CompressionState::Disabled);
        assert_eq!(
            CompressionState::from_threshold(256).threshold(),
            Some(256)
        );
    }

    #[test]
    fn test_raw_packet_frame_data() {
        let raw = RawPacket::new(0x42, vec![1, 2, 3]);
        let data = raw.to_frame_data();
        assert_eq!(&data[..], &[0x42, 1, 2, 3]);
        assert_eq!(raw.len(), 4);

        let parsed = RawPacket::from_frame_data(data.freeze()).unwrap();
        assert_eq!(parsed, raw);
    }

    #[test]
    fn test_packet_error_kind() {
        let err = PacketError::InvalidLength {
            length: MAX_FRAME_LENGTH + 1,
            max: MAX_FRAME_LENGTH,
        };
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);

        let eof = PacketError::Io(io::Error::from(io::ErrorKind::UnexpectedEof));
        assert!(eof.is_eof());
        assert!(!PacketError::Compression("bad".into()).is_eof());

        let io_err: io::Error = PacketError::Encryption("x".into()).into();
        assert_eq!(io_err.kind(), io::ErrorKind::InvalidData);
    }
}
