//! Versioned lookup tables from `(state, id)` to packet decoders.
//!
//! Tables are built once per process and never mutated afterwards, so
//! lookups need no locking.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::sync::LazyLock;

use bytes::Bytes;
use thiserror::Error;

use crate::minecraft::java::handshake::ServerBoundHandshake;
use crate::minecraft::java::login::*;
use crate::minecraft::java::play::*;
use crate::minecraft::java::status::*;
use crate::minecraft::java::{AnyServerboundPacket, ClientboundPacket};
use crate::packet::{ConnectionState, Direction, Packet};
use crate::types::CodecResult;
use crate::version::ProtocolVersion;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Duplicate {direction} packet 0x{id:02X} in state {state}")]
    Duplicate {
        direction: Direction,
        state: ConnectionState,
        id: i32,
    },

    #[error("Packet {name} is {actual}, table is {expected}")]
    DirectionMismatch {
        name: &'static str,
        expected: Direction,
        actual: Direction,
    },

    #[error("No packet table for protocol {0}")]
    UnsupportedVersion(ProtocolVersion),
}

pub type DecodeFn<P> = fn(&mut Bytes) -> CodecResult<P>;

/// One registered packet: where it lives in the protocol and how to decode it.
pub struct PacketDescriptor<P> {
    pub id: i32,
    pub state: ConnectionState,
    pub direction: Direction,
    pub name: &'static str,
    decode: DecodeFn<P>,
}

impl<P> PacketDescriptor<P> {
    /// Decodes a packet body. Trailing bytes are left in `body`.
    pub fn decode(&self, body: &mut Bytes) -> CodecResult<P> {
        (self.decode)(body)
    }
}

impl<P> fmt::Debug for PacketDescriptor<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PacketDescriptor")
            .field("id", &format_args!("0x{:02X}", self.id))
            .field("state", &self.state)
            .field("direction", &self.direction)
            .field("name", &self.name)
            .finish()
    }
}

fn decode_into<T, P>(body: &mut Bytes) -> CodecResult<P>
where
    T: Packet + Into<P>,
{
    let (packet, _) = T::read_from(body)?;
    Ok(packet.into())
}

/// Descriptors for one direction, partitioned by connection state.
pub struct PacketTable<P> {
    direction: Direction,
    entries: HashMap<(ConnectionState, i32), PacketDescriptor<P>>,
}

impl<P> PacketTable<P> {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            entries: HashMap::new(),
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn register(
        &mut self,
        state: ConnectionState,
        id: i32,
        name: &'static str,
        decode: DecodeFn<P>,
    ) -> Result<(), RegistryError> {
        match self.entries.entry((state, id)) {
            Entry::Occupied(_) => Err(RegistryError::Duplicate {
                direction: self.direction,
                state,
                id,
            }),
            Entry::Vacant(slot) => {
                slot.insert(PacketDescriptor {
                    id,
                    state,
                    direction: self.direction,
                    name,
                    decode,
                });
                Ok(())
            }
        }
    }

    /// Registers a packet type using its own metadata.
    pub fn register_packet<T>(&mut self) -> Result<(), RegistryError>
    where
        T: Packet + Into<P>,
    {
        if T::DIRECTION != self.direction {
            return Err(RegistryError::DirectionMismatch {
                name: T::NAME,
                expected: self.direction,
                actual: T::DIRECTION,
            });
        }
        self.register(T::STATE, T::ID, T::NAME, decode_into::<T, P>)
    }

    /// `None` means the id is unknown in this state.
    pub fn lookup(&self, state: ConnectionState, id: i32) -> Option<&PacketDescriptor<P>> {
        self.entries.get(&(state, id))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Both directions of one protocol version.
pub struct PacketRegistry {
    version: ProtocolVersion,
    clientbound: PacketTable<ClientboundPacket>,
    serverbound: PacketTable<AnyServerboundPacket>,
}

static REGISTRY_754: LazyLock<Result<PacketRegistry, RegistryError>> =
    LazyLock::new(PacketRegistry::build_v754);

impl PacketRegistry {
    pub fn new(version: ProtocolVersion) -> Self {
        Self {
            version,
            clientbound: PacketTable::new(Direction::Clientbound),
            serverbound: PacketTable::new(Direction::Serverbound),
        }
    }

    /// The shared table for `version`, built on first use.
    pub fn for_version(version: ProtocolVersion) -> Result<&'static PacketRegistry, RegistryError> {
        if !version.is_supported() {
            return Err(RegistryError::UnsupportedVersion(version));
        }
        (*REGISTRY_754).as_ref().map_err(Clone::clone)
    }

    pub fn version(&self) -> ProtocolVersion {
        self.version
    }

    pub fn clientbound(&self) -> &PacketTable<ClientboundPacket> {
        &self.clientbound
    }

    pub fn serverbound(&self) -> &PacketTable<AnyServerboundPacket> {
        &self.serverbound
    }

    pub fn lookup_clientbound(
        &self,
        state: ConnectionState,
        id: i32,
    ) -> Option<&PacketDescriptor<ClientboundPacket>> {
        self.clientbound.lookup(state, id)
    }

    pub fn lookup_serverbound(
        &self,
        state: ConnectionState,
        id: i32,
    ) -> Option<&PacketDescriptor<AnyServerboundPacket>> {
        self.serverbound.lookup(state, id)
    }

    /// Name of a registered packet in either direction, for logging.
    pub fn packet_name(
        &self,
        direction: Direction,
        state: ConnectionState,
        id: i32,
    ) -> Option<&'static str> {
        match direction {
            Direction::Clientbound => self.clientbound.lookup(state, id).map(|d| d.name),
            Direction::Serverbound => self.serverbound.lookup(state, id).map(|d| d.name),
        }
    }

    fn build_v754() -> Result<PacketRegistry, RegistryError> {
        let mut registry = PacketRegistry::new(ProtocolVersion::V1_16_5);

        let cb = &mut registry.clientbound;
        cb.register_packet::<ClientBoundResponse>()?;
        cb.register_packet::<ClientBoundPong>()?;
        cb.register_packet::<ClientBoundLoginDisconnect>()?;
        cb.register_packet::<ClientBoundEncryptionRequest>()?;
        cb.register_packet::<ClientBoundLoginSuccess>()?;
        cb.register_packet::<ClientBoundSetCompression>()?;
        cb.register_packet::<ClientBoundPluginRequest>()?;
        cb.register_packet::<ClientBoundBlockChange>()?;
        cb.register_packet::<ClientBoundServerDifficulty>()?;
        cb.register_packet::<ClientBoundChatMessage>()?;
        cb.register_packet::<ClientBoundDisconnect>()?;
        cb.register_packet::<ClientBoundUnloadChunk>()?;
        cb.register_packet::<ClientBoundOpenHorseWindow>()?;
        cb.register_packet::<ClientBoundKeepAlive>()?;
        cb.register_packet::<ClientBoundChunkData>()?;
        cb.register_packet::<ClientBoundJoinGame>()?;
        cb.register_packet::<ClientBoundEntityRotation>()?;
        cb.register_packet::<ClientBoundVehicleMove>()?;
        cb.register_packet::<ClientBoundPlayerPositionAndLook>()?;
        cb.register_packet::<ClientBoundSpawnPosition>()?;
        cb.register_packet::<ClientBoundTimeUpdate>()?;

        let sb = &mut registry.serverbound;
        sb.register_packet::<ServerBoundHandshake>()?;
        sb.register_packet::<ServerBoundRequest>()?;
        sb.register_packet::<ServerBoundPing>()?;
        sb.register_packet::<ServerBoundLoginStart>()?;
        sb.register_packet::<ServerBoundEncryptionResponse>()?;
        sb.register_packet::<ServerBoundPluginResponse>()?;
        sb.register_packet::<ServerBoundTeleportConfirm>()?;
        sb.register_packet::<ServerBoundChatMessage>()?;
        sb.register_packet::<ServerBoundClientStatus>()?;
        sb.register_packet::<ServerBoundKeepAlive>()?;

        Ok(registry)
    }
}

impl fmt::Debug for PacketRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PacketRegistry")
            .field("version", &self.version)
            .field("clientbound", &self.clientbound.len())
            .field("serverbound", &self.serverbound.len())
            .finish()
    }
}
