use std::io;
use std::time::Duration;

use thiserror::Error;

pub use blockwire_protocol::{CodecError, PacketError, RegistryError};
use blockwire_protocol::ConnectionState;

/// Errors raised by [`Connection`](crate::network::connection::Connection).
///
/// `Transport` covers refused, timed out and broken streams. The other
/// variants describe a single refused operation.
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("Transport error: {0}")]
    Transport(#[from] io::Error),

    #[error("Packet error: {0}")]
    Packet(#[from] PacketError),

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Cannot send {packet} ({expected}) while in state {actual}")]
    ProtocolStateMismatch {
        packet: &'static str,
        expected: ConnectionState,
        actual: ConnectionState,
    },

    #[error("Invalid state transition {from} -> {to}")]
    InvalidTransition {
        from: ConnectionState,
        to: ConnectionState,
    },

    #[error("Connection is closed")]
    Closed,
}

impl ConnectionError {
    pub fn is_closed(&self) -> bool {
        match self {
            ConnectionError::Closed => true,
            ConnectionError::Transport(e) => matches!(
                e.kind(),
                io::ErrorKind::BrokenPipe
                    | io::ErrorKind::ConnectionReset
                    | io::ErrorKind::ConnectionAborted
                    | io::ErrorKind::UnexpectedEof
            ),
            ConnectionError::Packet(e) => e.is_eof(),
            _ => false,
        }
    }
}

/// Errors returned by packet handlers. They are logged at the dispatch
/// boundary and never close the connection on their own.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("{packet} received in state {actual}, expected {expected}")]
    ProtocolStateMismatch {
        packet: &'static str,
        expected: ConnectionState,
        actual: ConnectionState,
    },

    #[error("Login has not completed, dropping {0}")]
    NotLoggedIn(&'static str),

    #[error("Connection error: {0}")]
    Connection(#[from] ConnectionError),

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),
}

impl HandlerError {
    /// Wrong-phase packets are expected noise and only warrant a warning.
    pub fn is_state_mismatch(&self) -> bool {
        matches!(
            self,
            HandlerError::ProtocolStateMismatch { .. } | HandlerError::NotLoggedIn(_)
        )
    }
}

#[derive(Debug, Error)]
pub enum RsaError {
    #[error("{0}")]
    RsaLib(#[from] rsa::Error),

    #[error("Key encoding error: {0}")]
    KeyEncodingError(String),
}

impl From<RsaError> for io::Error {
    fn from(err: RsaError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Session server rejected the join ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("RSA error: {0}")]
    Rsa(#[from] RsaError),

    #[error("Server requires authentication but account '{0}' is offline")]
    OfflineAccount(String),
}

#[derive(Debug, Error)]
pub enum PingError {
    #[error("No status response within {0:?}")]
    Timeout(Duration),

    #[error("Connection error: {0}")]
    Connection(#[from] ConnectionError),

    #[error("Disconnected before the status response: {0}")]
    Disconnected(String),
}

pub type Result<T> = std::result::Result<T, ConnectionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_classification() {
        assert!(ConnectionError::Closed.is_closed());
        assert!(
            ConnectionError::Transport(io::Error::from(io::ErrorKind::BrokenPipe)).is_closed()
        );
        assert!(
            ConnectionError::Packet(PacketError::Io(io::Error::from(
                io::ErrorKind::UnexpectedEof
            )))
            .is_closed()
        );
        assert!(
            !ConnectionError::Transport(io::Error::from(io::ErrorKind::TimedOut)).is_closed()
        );
    }

    #[test]
    fn test_state_mismatch_is_soft() {
        let err = HandlerError::ProtocolStateMismatch {
            packet: "KeepAlive",
            expected: ConnectionState::Play,
            actual: ConnectionState::Login,
        };
        assert!(err.is_state_mismatch());
        assert!(err.to_string().contains("KeepAlive"));
        assert!(!HandlerError::Connection(ConnectionError::Closed).is_state_mismatch());
    }
}
