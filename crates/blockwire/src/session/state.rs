use std::sync::Arc;
use std::time::{Duration, Instant};

use blockwire_config::Account;
use blockwire_event::WorldInfo;
use blockwire_protocol::minecraft::java::play::GameMode;
use blockwire_protocol::minecraft::java::status::ServerStatus;
use blockwire_protocol::types::Position;
use parking_lot::{Mutex, RwLock};
use uuid::Uuid;

use crate::security::Authenticator;

/// What the client knows about its own player.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerState {
    pub username: String,
    /// Assigned by the server in `LoginSuccess`.
    pub uuid: Option<Uuid>,
    pub entity_id: Option<i32>,
    pub game_mode: GameMode,
    pub spawn: Option<Position>,
    pub position: [f64; 3],
    /// Yaw, pitch in degrees.
    pub rotation: [f32; 2],
    pub terrain_loaded: bool,
}

impl PlayerState {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Default::default()
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.uuid.is_some()
    }
}

#[derive(Debug, Default)]
struct StatusExchange {
    ping: Option<(i64, Instant)>,
    response: Option<ServerStatus>,
}

/// State shared between the session facade and the handlers running on
/// the receive task.
///
/// Only handlers write to it; everything else reads snapshots.
pub struct SessionState {
    account: Account,
    authenticator: Arc<dyn Authenticator>,
    player: RwLock<PlayerState>,
    world: RwLock<Option<WorldInfo>>,
    status: Mutex<StatusExchange>,
}

impl std::fmt::Debug for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionState")
            .field("account", &self.account)
            .field("player", &*self.player.read())
            .finish_non_exhaustive()
    }
}

impl SessionState {
    pub fn new(account: Account, authenticator: Arc<dyn Authenticator>) -> Self {
        let player = PlayerState::new(account.username());
        Self {
            account,
            authenticator,
            player: RwLock::new(player),
            world: RwLock::new(None),
            status: Mutex::new(StatusExchange::default()),
        }
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn authenticator(&self) -> &dyn Authenticator {
        self.authenticator.as_ref()
    }

    pub fn player(&self) -> PlayerState {
        self.player.read().clone()
    }

    pub fn world(&self) -> Option<WorldInfo> {
        self.world.read().clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.player.read().is_logged_in()
    }

    pub(crate) fn update_player<R>(&self, f: impl FnOnce(&mut PlayerState) -> R) -> R {
        f(&mut self.player.write())
    }

    pub(crate) fn set_world(&self, world: WorldInfo) {
        *self.world.write() = Some(world);
    }

    /// Runs `f` on the current world, if `JoinGame` has been seen.
    pub(crate) fn update_world(&self, f: impl FnOnce(&mut WorldInfo)) -> bool {
        match self.world.write().as_mut() {
            Some(world) => {
                f(world);
                true
            }
            None => false,
        }
    }

    /// Forgets everything learned from a previous connection.
    pub(crate) fn reset(&self) {
        *self.player.write() = PlayerState::new(self.account.username());
        *self.world.write() = None;
        *self.status.lock() = StatusExchange::default();
    }

    /// Remembers a ping so the matching pong can be timed.
    pub(crate) fn begin_ping(&self, payload: i64) {
        *self.status.lock() = StatusExchange {
            ping: Some((payload, Instant::now())),
            response: None,
        };
    }

    /// Holds the response back while a ping is outstanding. Returns it
    /// unchanged when nothing is waiting for a pong.
    pub(crate) fn stash_status(&self, status: ServerStatus) -> Option<ServerStatus> {
        let mut exchange = self.status.lock();
        if exchange.ping.is_some() {
            exchange.response = Some(status);
            None
        } else {
            Some(status)
        }
    }

    /// Gives up on the pong and hands back a response received so far.
    pub(crate) fn abandon_ping(&self) -> Option<ServerStatus> {
        let mut exchange = self.status.lock();
        exchange.ping = None;
        exchange.response.take()
    }

    /// Completes the exchange started by [`SessionState::begin_ping`].
    pub(crate) fn finish_ping(&self, payload: i64) -> Option<(ServerStatus, Duration, bool)> {
        let mut exchange = self.status.lock();
        let (sent, sent_at) = exchange.ping.take()?;
        let status = exchange.response.take()?;
        Some((status, sent_at.elapsed(), sent == payload))
    }
}
