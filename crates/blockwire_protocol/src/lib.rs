//! Java Edition protocol 754 for Blockwire.
//!
//! Field codecs, packet definitions for every phase, the connection state
//! machine values and the versioned packet registry.

pub mod minecraft;
pub mod packet;
pub mod registry;
pub mod types;
pub mod version;

// Re-export the most commonly used types
pub use minecraft::java::{AnyServerboundPacket, ClientboundPacket};
pub use packet::{
    CompressionState, ConnectionState, Direction, Packet, PacketError, RawPacket,
    ServerboundPacket,
};
pub use registry::{PacketDescriptor, PacketRegistry, RegistryError};
pub use types::{CodecError, CodecResult, ProtocolRead, ProtocolWrite};
pub use version::ProtocolVersion;
