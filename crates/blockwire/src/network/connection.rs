use std::future::Future;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::time::Duration;

use blockwire_config::{LogType, ServerAddress};
use blockwire_event::{ConnectionReady, ConnectionStateChanged, Disconnected, EventBus};
use blockwire_protocol::minecraft::java::handshake::ServerBoundHandshake;
use blockwire_protocol::{
    CompressionState, ConnectionState, PacketRegistry, ProtocolVersion, RawPacket,
    ServerboundPacket,
};
use parking_lot::Mutex;
use tokio::io::{BufReader, BufWriter};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::sync::{Mutex as AsyncMutex, watch};
use tracing::{debug, error, info, trace, warn};

use super::packet::io::is_recoverable;
use super::packet::{PacketReader, PacketWriter};
use crate::core::error::{ConnectionError, Result};
use crate::security::encryption::{Aes128Cfb8Dec, SHARED_SECRET_LEN, create_cipher};
use crate::session::PacketHandler;

type Reader = PacketReader<BufReader<OwnedReadHalf>>;
type Writer = PacketWriter<BufWriter<OwnedWriteHalf>>;

const NO_COMPRESSION: i32 = -1;

#[derive(Debug, Clone)]
pub struct ConnectionOptions {
    pub protocol_version: ProtocolVersion,
    pub connect_timeout: Duration,
}

impl Default for ConnectionOptions {
    fn default() -> Self {
        Self {
            protocol_version: ProtocolVersion::default(),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

/// One TCP session with the server, from `connect` until the transport is
/// gone. Closing the link twice is a no-op.
struct Link {
    shutdown: watch::Sender<bool>,
    disconnected: AtomicBool,
}

struct ConnectionInner {
    address: ServerAddress,
    options: ConnectionOptions,
    registry: &'static PacketRegistry,
    events: Arc<EventBus>,

    state: Mutex<ConnectionState>,
    link: Mutex<Option<Arc<Link>>>,
    writer: AsyncMutex<Option<Writer>>,

    // Picked up by the receive loop before each frame.
    compression_threshold: AtomicI32,
    pending_decryptor: Mutex<Option<Aes128Cfb8Dec>>,
}

/// Cheap, clonable handle to a client connection.
///
/// A single receive task owns the read half and runs every handler in
/// order. Any task may send; frames are written whole under an async lock.
///
/// The handle given to handlers is bound to the link its receive loop
/// reads from. Once that link is replaced, writes through it fail with
/// [`ConnectionError::Closed`].
#[derive(Clone)]
pub struct Connection {
    inner: Arc<ConnectionInner>,
    bound: Option<Arc<Link>>,
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("address", &self.inner.address)
            .field("state", &self.state())
            .finish()
    }
}

impl Connection {
    pub fn new(
        address: ServerAddress,
        options: ConnectionOptions,
        events: Arc<EventBus>,
    ) -> Result<Self> {
        let registry = PacketRegistry::for_version(options.protocol_version)?;
        Ok(Self {
            inner: Arc::new(ConnectionInner {
                address,
                options,
                registry,
                events,
                state: Mutex::new(ConnectionState::Idle),
                link: Mutex::new(None),
                writer: AsyncMutex::new(None),
                compression_threshold: AtomicI32::new(NO_COMPRESSION),
                pending_decryptor: Mutex::new(None),
            }),
            bound: None,
        })
    }

    pub fn address(&self) -> &ServerAddress {
        &self.inner.address
    }

    pub fn protocol_version(&self) -> ProtocolVersion {
        self.inner.options.protocol_version
    }

    pub fn events(&self) -> &Arc<EventBus> {
        &self.inner.events
    }

    pub fn state(&self) -> ConnectionState {
        *self.inner.state.lock()
    }

    pub fn is_connected(&self) -> bool {
        !self.state().is_disconnected()
    }

    /// Moves along the forward-only state table and announces the change.
    pub fn transition(&self, to: ConnectionState) -> Result<()> {
        if self.is_stale() {
            return Err(ConnectionError::Closed);
        }
        let from = {
            let mut state = self.inner.state.lock();
            let from = *state;
            if from == to {
                return Ok(());
            }
            if !from.can_transition_to(to) {
                return Err(ConnectionError::InvalidTransition { from, to });
            }
            *state = to;
            from
        };
        self.announce_state(from, to);
        Ok(())
    }

    fn announce_state(&self, from: ConnectionState, to: ConnectionState) {
        debug!(
            log_type = LogType::TcpConnection.as_str(),
            "Connection state {} -> {}", from, to
        );
        self.inner
            .events
            .emit(&ConnectionStateChanged { from, to });
    }

    /// Opens the TCP stream and starts the receive loop.
    ///
    /// Only valid from `Idle`; call [`Connection::restart`] to reuse a
    /// closed connection.
    pub async fn connect(&self, handler: Arc<dyn PacketHandler>) -> Result<()> {
        let current = self.state();
        if current != ConnectionState::Idle {
            return Err(ConnectionError::InvalidTransition {
                from: current,
                to: ConnectionState::Handshaking,
            });
        }

        let address = &self.inner.address;
        let timeout = self.inner.options.connect_timeout;
        debug!(
            log_type = LogType::TcpConnection.as_str(),
            "Connecting to {} (timeout {:?})", address, timeout
        );

        let stream = tokio::time::timeout(
            timeout,
            TcpStream::connect((address.host.as_str(), address.port)),
        )
        .await
        .map_err(|_| {
            io::Error::new(
                io::ErrorKind::TimedOut,
                format!("connecting to {} timed out after {:?}", address, timeout),
            )
        })??;
        stream.set_nodelay(true)?;

        let (read_half, write_half) = stream.into_split();
        let (shutdown, shutdown_rx) = watch::channel(false);
        let link = Arc::new(Link {
            shutdown,
            disconnected: AtomicBool::new(false),
        });
        {
            // Swapped under the writer lock, see `is_current`.
            let mut writer = self.inner.writer.lock().await;
            *writer = Some(PacketWriter::new(BufWriter::new(write_half)));
            *self.inner.link.lock() = Some(link.clone());
        }
        self.inner
            .compression_threshold
            .store(NO_COMPRESSION, Ordering::SeqCst);
        self.inner.pending_decryptor.lock().take();

        self.transition(ConnectionState::Handshaking)?;

        let reader = PacketReader::new(BufReader::new(read_half));
        let bound = Connection {
            inner: self.inner.clone(),
            bound: Some(link.clone()),
        };
        tokio::spawn(bound.receive_loop(reader, shutdown_rx, link, handler));
        Ok(())
    }

    /// Sends the handshake, switches to `next_state` and then runs `then`.
    ///
    /// `then` sees the new state, so its first packet is always written
    /// after the handshake frame.
    pub async fn handshake<F, Fut>(&self, next_state: ConnectionState, then: F) -> Result<()>
    where
        F: FnOnce(Connection) -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        let intent = next_state
            .handshake_intent()
            .ok_or(ConnectionError::InvalidTransition {
                from: self.state(),
                to: next_state,
            })?;

        let address = &self.inner.address;
        let handshake = ServerBoundHandshake::new(
            self.inner.options.protocol_version,
            address.host.clone(),
            address.port,
            intent,
        );
        self.send_packet(&handshake).await?;
        self.transition(next_state)?;

        then(self.clone()).await
    }

    /// Encodes and writes one packet. Refused unless the packet belongs to
    /// the current state.
    pub async fn send_packet<P: ServerboundPacket>(&self, packet: &P) -> Result<()> {
        let actual = self.state();
        if P::STATE != actual {
            return Err(ConnectionError::ProtocolStateMismatch {
                packet: P::NAME,
                expected: P::STATE,
                actual,
            });
        }

        let raw = packet.to_raw()?;
        self.send_raw(&raw).await?;
        trace!(
            log_type = LogType::PacketProcessing.as_str(),
            "Sent {} (0x{:02X}, {} bytes)",
            P::NAME,
            P::ID,
            raw.len()
        );
        Ok(())
    }

    /// Writes a pre-encoded frame without any state check.
    pub async fn send_raw(&self, packet: &RawPacket) -> Result<()> {
        let mut guard = self.inner.writer.lock().await;
        let writer = self.writable(&mut guard)?;
        writer.write_packet(packet).await?;
        Ok(())
    }

    /// The open writer, unless this handle belongs to a replaced link.
    /// Must be called with the writer lock held, see `connect`.
    fn writable<'a>(&self, guard: &'a mut Option<Writer>) -> Result<&'a mut Writer> {
        if self.is_stale() {
            return Err(ConnectionError::Closed);
        }
        guard.as_mut().ok_or(ConnectionError::Closed)
    }

    /// The writer switches now, the reader before the next frame. A negative
    /// threshold turns compression off.
    pub async fn enable_compression(&self, threshold: i32) -> Result<()> {
        let compression = CompressionState::from_threshold(threshold);
        {
            let mut guard = self.inner.writer.lock().await;
            self.writable(&mut guard)?.set_compression(compression);
            self.inner
                .compression_threshold
                .store(compression.threshold().unwrap_or(NO_COMPRESSION), Ordering::SeqCst);
        }

        debug!(
            log_type = LogType::PacketProcessing.as_str(),
            "Compression set to {:?}", compression
        );
        Ok(())
    }

    /// Turns on AES-128-CFB8 in both directions.
    pub async fn enable_encryption(&self, shared_secret: &[u8; SHARED_SECRET_LEN]) -> Result<()> {
        let (encryptor, decryptor) = create_cipher(shared_secret);
        {
            let mut guard = self.inner.writer.lock().await;
            self.writable(&mut guard)?.enable_encryption(encryptor);
            *self.inner.pending_decryptor.lock() = Some(decryptor);
        }

        debug!(
            log_type = LogType::Authentication.as_str(),
            "Encryption enabled"
        );
        Ok(())
    }

    /// Stops the receive loop, shuts the write half and moves to `Closed`.
    pub async fn close(&self) {
        self.close_with_reason("closed by client").await;
    }

    async fn close_with_reason(&self, reason: &str) {
        // A replaced link only stops its own loop.
        if let Some(bound) = &self.bound {
            if !self.is_current(bound) {
                let _ = bound.shutdown.send(true);
                return;
            }
        }

        let link = self.inner.link.lock().clone();
        if let Some(link) = &link {
            let _ = link.shutdown.send(true);
        }

        if let Some(mut writer) = self.inner.writer.lock().await.take() {
            if let Err(e) = writer.close().await {
                trace!(
                    log_type = LogType::TcpConnection.as_str(),
                    "Error shutting down write half: {}", e
                );
            }
        }

        match link {
            Some(link) => self.mark_disconnected(&link, reason),
            None => {
                let _ = self.transition(ConnectionState::Closed);
            }
        }
    }

    /// Closes whatever is open and resets to `Idle` so `connect` can run
    /// again.
    pub async fn restart(&self) {
        if self.state() != ConnectionState::Idle {
            self.close().await;
        }

        self.inner.link.lock().take();
        self.inner.pending_decryptor.lock().take();
        self.inner
            .compression_threshold
            .store(NO_COMPRESSION, Ordering::SeqCst);

        let from = std::mem::replace(&mut *self.inner.state.lock(), ConnectionState::Idle);
        if from != ConnectionState::Idle {
            self.announce_state(from, ConnectionState::Idle);
        }
    }

    fn mark_disconnected(&self, link: &Link, reason: &str) {
        if link.disconnected.swap(true, Ordering::AcqRel) {
            return;
        }

        let _ = self.transition(ConnectionState::Closed);
        info!(
            log_type = LogType::TcpConnection.as_str(),
            "Disconnected from {}: {}", self.inner.address, reason
        );
        self.inner.events.emit(&Disconnected {
            reason: reason.to_string(),
        });
    }

    fn sync_reader(&self, reader: &mut Reader) {
        let threshold = self.inner.compression_threshold.load(Ordering::SeqCst);
        let compression = CompressionState::from_threshold(threshold);
        if reader.compression() != compression {
            reader.set_compression(compression);
        }
        if let Some(decryptor) = self.inner.pending_decryptor.lock().take() {
            reader.enable_encryption(decryptor);
        }
    }

    async fn receive_loop(
        self,
        mut reader: Reader,
        mut shutdown: watch::Receiver<bool>,
        link: Arc<Link>,
        handler: Arc<dyn PacketHandler>,
    ) {
        self.inner.events.emit(&ConnectionReady {
            address: self.inner.address.to_string(),
        });

        let reason = loop {
            self.sync_reader(&mut reader);

            let result = tokio::select! {
                biased;
                _ = shutdown.changed() => break "closed by client".to_string(),
                result = reader.read_packet() => result,
            };

            match result {
                Ok(raw) => self.dispatch(raw, handler.as_ref()).await,
                Err(e) if is_recoverable(&e) => {
                    warn!(
                        log_type = LogType::PacketProcessing.as_str(),
                        "Dropping unreadable frame: {}", e
                    );
                }
                Err(e) if e.is_eof() => break "connection closed by server".to_string(),
                Err(e) => break format!("read failed: {}", e),
            }
        };

        {
            let mut writer = self.inner.writer.lock().await;
            if self.is_current(&link) {
                writer.take();
            }
        }
        self.mark_disconnected(&link, &reason);
    }

    fn is_stale(&self) -> bool {
        self.bound
            .as_ref()
            .is_some_and(|bound| !self.is_current(bound))
    }

    /// A loop only tears down the writer of its own link.
    fn is_current(&self, link: &Arc<Link>) -> bool {
        self.inner
            .link
            .lock()
            .as_ref()
            .is_some_and(|current| Arc::ptr_eq(current, link))
    }

    async fn dispatch(&self, raw: RawPacket, handler: &dyn PacketHandler) {
        let state = self.state();
        let Some(descriptor) = self.inner.registry.lookup_clientbound(state, raw.id) else {
            debug!(
                log_type = LogType::PacketProcessing.as_str(),
                "Unknown packet 0x{:02X} in state {} ({} bytes), dropping",
                raw.id,
                state,
                raw.body.len()
            );
            return;
        };

        let mut body = raw.body;
        let packet = match descriptor.decode(&mut body) {
            Ok(packet) => packet,
            Err(e) => {
                warn!(
                    log_type = LogType::PacketProcessing.as_str(),
                    "Failed to decode {} in state {}: {}", descriptor.name, state, e
                );
                return;
            }
        };
        if !body.is_empty() {
            trace!(
                log_type = LogType::PacketProcessing.as_str(),
                "{} left {} trailing bytes",
                descriptor.name,
                body.len()
            );
        }

        trace!(
            log_type = LogType::PacketProcessing.as_str(),
            "Received {} (0x{:02X})", descriptor.name, descriptor.id
        );

        if let Err(e) = handler.handle(self, packet).await {
            if e.is_state_mismatch() {
                warn!(
                    log_type = LogType::PacketProcessing.as_str(),
                    "Dropping {}: {}", descriptor.name, e
                );
            } else {
                error!(
                    log_type = LogType::PacketProcessing.as_str(),
                    "Handler for {} failed: {}", descriptor.name, e
                );
            }
        }
    }
}
