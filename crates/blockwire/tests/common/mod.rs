//! In-process fake server for driving a real client connection.

#![allow(dead_code)]

use std::any::Any;
use std::collections::HashMap;
use std::time::Duration;

use blockwire::config::ServerAddress;
use blockwire::event::EventBus;
use blockwire::network::{PacketReader, PacketWriter};
use blockwire::protocol::minecraft::java::handshake::ServerBoundHandshake;
use blockwire::protocol::minecraft::java::login::{
    ClientBoundLoginSuccess, ClientBoundSetCompression, ServerBoundLoginStart,
};
use blockwire::protocol::minecraft::java::play::ClientBoundJoinGame;
use blockwire::protocol::types::{
    Boolean, Byte, Identifier, Int, Long, Nbt, PrefixedArray, UnsignedByte, VarInt,
};
use blockwire::protocol::{CompressionState, ConnectionState, Packet, RawPacket};
use blockwire::security::encryption::{SHARED_SECRET_LEN, create_cipher};
use bytes::BytesMut;
use fastnbt::Value;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};
use tokio::time::timeout;
use uuid::Uuid;

pub const TIMEOUT: Duration = Duration::from_secs(5);

pub struct FakeServer {
    listener: TcpListener,
    address: ServerAddress,
}

impl FakeServer {
    pub async fn bind() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        Self {
            listener,
            address: ServerAddress::new("127.0.0.1", port),
        }
    }

    pub fn address(&self) -> ServerAddress {
        self.address.clone()
    }

    pub async fn accept_stream(&self) -> TcpStream {
        let (stream, _) = timeout(TIMEOUT, self.listener.accept())
            .await
            .expect("client never connected")
            .unwrap();
        stream.set_nodelay(true).unwrap();
        stream
    }

    pub async fn accept(&self) -> ServerConnection {
        let (read_half, write_half) = self.accept_stream().await.into_split();
        ServerConnection {
            reader: PacketReader::new(read_half),
            writer: PacketWriter::new(write_half),
        }
    }
}

/// Server side of one client connection.
pub struct ServerConnection {
    pub reader: PacketReader<OwnedReadHalf>,
    pub writer: PacketWriter<OwnedWriteHalf>,
}

impl ServerConnection {
    pub async fn read_raw(&mut self) -> RawPacket {
        timeout(TIMEOUT, self.reader.read_packet())
            .await
            .expect("client sent nothing")
            .unwrap()
    }

    pub async fn read<P: Packet>(&mut self) -> P {
        let raw = self.read_raw().await;
        assert_eq!(raw.id, P::ID, "expected {}, got id 0x{:02X}", P::NAME, raw.id);
        let mut body = raw.body;
        P::read_from(&mut body).unwrap().0
    }

    pub async fn send<P: Packet>(&mut self, packet: &P) {
        let mut body = BytesMut::new();
        packet.write_to(&mut body).unwrap();
        self.send_raw(&RawPacket::new(P::ID, body.freeze())).await;
    }

    pub async fn send_raw(&mut self, raw: &RawPacket) {
        self.writer.write_packet(raw).await.unwrap();
    }

    pub fn set_compression(&mut self, threshold: i32) {
        let compression = CompressionState::from_threshold(threshold);
        self.reader.set_compression(compression);
        self.writer.set_compression(compression);
    }

    pub fn enable_encryption(&mut self, shared_secret: &[u8; SHARED_SECRET_LEN]) {
        let (encryptor, decryptor) = create_cipher(shared_secret);
        self.writer.enable_encryption(encryptor);
        self.reader.enable_encryption(decryptor);
    }

    pub async fn expect_handshake(&mut self, next_state: ConnectionState) -> ServerBoundHandshake {
        let handshake = self.read::<ServerBoundHandshake>().await;
        assert_eq!(handshake.protocol_version.0, 754);
        assert_eq!(handshake.target_state(), Some(next_state));
        handshake
    }

    /// Handshake, `LoginStart`, compression at 256 and `LoginSuccess`.
    pub async fn accept_login(&mut self) -> (String, Uuid) {
        self.expect_handshake(ConnectionState::Login).await;
        let username = self.read::<ServerBoundLoginStart>().await.name.0;

        self.send(&ClientBoundSetCompression::new(256)).await;
        self.set_compression(256);

        let uuid = Uuid::new_v4();
        self.send(&ClientBoundLoginSuccess::new(uuid, username.clone()))
            .await;
        (username, uuid)
    }
}

pub fn join_game(entity_id: i32) -> ClientBoundJoinGame {
    let overworld = Identifier::parse("minecraft:overworld");
    let mut codec = HashMap::new();
    codec.insert(
        "minecraft:dimension_type".to_string(),
        Value::Compound(HashMap::new()),
    );
    let mut dimension = HashMap::new();
    dimension.insert("natural".to_string(), Value::Byte(1));

    ClientBoundJoinGame {
        entity_id: Int(entity_id),
        is_hardcore: Boolean(false),
        gamemode: UnsignedByte(1),
        previous_gamemode: Byte(-1),
        world_names: PrefixedArray(vec![overworld.clone()]),
        dimension_codec: Nbt(Value::Compound(codec)),
        dimension: Nbt(Value::Compound(dimension)),
        world_name: overworld,
        hashed_seed: Long(42),
        max_players: VarInt(20),
        view_distance: VarInt(10),
        reduced_debug_info: Boolean(false),
        enable_respawn_screen: Boolean(true),
        is_debug: Boolean(false),
        is_flat: Boolean(true),
    }
}

/// Forwards every `E` emitted on the bus into a channel.
pub fn record<E>(events: &EventBus) -> UnboundedReceiver<E>
where
    E: Any + Clone + Send + Sync + 'static,
{
    let (tx, rx) = unbounded_channel();
    events.on::<E, _>(move |event| {
        let _ = tx.send(event.clone());
    });
    rx
}

pub async fn next_event<E>(rx: &mut UnboundedReceiver<E>) -> E {
    timeout(TIMEOUT, rx.recv())
        .await
        .expect("event was not emitted in time")
        .expect("event bus dropped")
}
