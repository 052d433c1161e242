//! Blockwire - a Minecraft Java Edition protocol client
//!
//! Framing, compression and encryption of the wire format, a connection with
//! a single receive task, the login/play session state machine and a server
//! pinger. Higher layers observe the session through the event bus.

pub mod core;
pub mod network;
pub mod pinger;
pub mod security;
pub mod session;
pub mod telemetry;

pub use crate::core::error::{AuthError, ConnectionError, HandlerError, PingError};
pub use network::connection::{Connection, ConnectionOptions};
pub use pinger::ServerPinger;
pub use session::{PacketHandler, PlayerState, ServerSession, SessionState};

pub use blockwire_config as config;
pub use blockwire_event as event;
pub use blockwire_protocol as protocol;
