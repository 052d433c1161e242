use std::sync::Arc;
use std::time::Duration;

use blockwire_config::{Account, ClientConfig, LogType, ServerAddress};
use blockwire_event::{Disconnected, EventBus, PingResult};
use blockwire_protocol::ConnectionState;
use blockwire_protocol::minecraft::java::status::{ServerBoundPing, ServerBoundRequest, ServerStatus};
use parking_lot::Mutex;
use tokio::sync::oneshot;
use tracing::{debug, info};

use crate::core::error::PingError;
use crate::security::OfflineAuthenticator;
use crate::session::ServerSession;

type Outcome = Result<ServerStatus, PingError>;
type Slot = Arc<Mutex<Option<oneshot::Sender<Outcome>>>>;

/// Queries a server's status document and round-trip latency.
#[derive(Debug, Clone)]
pub struct ServerPinger {
    session: ServerSession,
    timeout: Duration,
}

impl ServerPinger {
    pub fn new(
        config: &ClientConfig,
        address: ServerAddress,
        events: Arc<EventBus>,
    ) -> Result<Self, PingError> {
        let session = ServerSession::with_authenticator(
            config,
            Account::default(),
            address,
            events,
            Arc::new(OfflineAuthenticator),
        )?;
        Ok(Self {
            session,
            timeout: config.ping_timeout(),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn session(&self) -> &ServerSession {
        &self.session
    }

    /// Connects, runs one status exchange and closes again.
    ///
    /// The returned status carries the measured latency when the server
    /// answered the ping. A server that closes after the status response
    /// but before the pong still yields the status, without latency.
    ///
    /// The handshake is sent from the calling task once `connect` returns;
    /// the receive loop is already running by then.
    pub async fn ping(&self) -> Result<ServerStatus, PingError> {
        let connection = self.session.connection();
        connection.restart().await;

        let events = self.session.events();
        let (tx, rx) = oneshot::channel();
        let slot: Slot = Arc::new(Mutex::new(Some(tx)));

        let result = {
            let slot = slot.clone();
            events.once::<PingResult, _>(move |event| {
                resolve(&slot, Ok(event.status.clone()));
            })
        };
        let disconnected = {
            let slot = slot.clone();
            let state = self.session.state().clone();
            events.once::<Disconnected, _>(move |event| {
                // A status without a pong still answers the ping.
                let outcome = match state.abandon_ping() {
                    Some(status) => {
                        debug!(
                            log_type = LogType::Ping.as_str(),
                            "Closed before the pong, reporting status without latency"
                        );
                        Ok(status)
                    }
                    None => Err(PingError::Disconnected(event.reason.clone())),
                };
                resolve(&slot, outcome);
            })
        };

        let outcome = tokio::time::timeout(self.timeout, self.exchange(rx)).await;

        for id in [result, disconnected] {
            events.off(id);
        }

        match outcome {
            Ok(outcome) => {
                connection.close().await;
                if let Ok(status) = &outcome {
                    info!(
                        log_type = LogType::Ping.as_str(),
                        "{} answered in {:?}",
                        connection.address(),
                        status.latency.unwrap_or_default()
                    );
                }
                outcome
            }
            Err(_) => {
                connection.restart().await;
                Err(PingError::Timeout(self.timeout))
            }
        }
    }

    async fn exchange(&self, rx: oneshot::Receiver<Outcome>) -> Outcome {
        self.session.connect().await?;

        let payload: i64 = rand::random();
        self.session.state().begin_ping(payload);

        self.session
            .connection()
            .handshake(ConnectionState::Status, |connection| async move {
                connection.send_packet(&ServerBoundRequest).await?;
                connection.send_packet(&ServerBoundPing::new(payload)).await
            })
            .await?;

        rx.await
            .unwrap_or_else(|_| Err(PingError::Disconnected("ping abandoned".to_string())))
    }
}

fn resolve(slot: &Slot, outcome: Outcome) {
    if let Some(tx) = slot.lock().take() {
        let _ = tx.send(outcome);
    }
}
