mod common;

use std::sync::Arc;
use std::time::Duration;

use blockwire::config::ClientConfig;
use blockwire::event::{Disconnected, EventBus, PingResult};
use blockwire::protocol::ConnectionState;
use blockwire::protocol::minecraft::java::status::{
    ClientBoundPong, ClientBoundResponse, ServerBoundPing, ServerBoundRequest,
};
use blockwire::protocol::types::Long;
use blockwire::{PingError, ServerPinger};
use common::FakeServer;

const STATUS_JSON: &str = r#"{
    "version": {"name": "Paper 1.16.5", "protocol": 754},
    "players": {"max": 50, "online": 2, "sample": [{"name": "Alex", "id": "4566e69f-c907-48ee-8d71-d7ba5aa00d20"}]},
    "description": {"text": "A fake server"}
}"#;

#[tokio::test]
async fn test_ping_end_to_end() {
    let server = FakeServer::bind().await;
    let address = server.address();
    let server_task = tokio::spawn(async move {
        let mut conn = server.accept().await;
        conn.expect_handshake(ConnectionState::Status).await;
        conn.read::<ServerBoundRequest>().await;
        let ping = conn.read::<ServerBoundPing>().await;

        conn.send(&ClientBoundResponse::new(STATUS_JSON)).await;
        conn.send(&ClientBoundPong {
            payload: Long(ping.payload.0),
        })
        .await;
        conn
    });

    let events = Arc::new(EventBus::new());
    let pinger = ServerPinger::new(&ClientConfig::default(), address, events.clone()).unwrap();
    let status = pinger.ping().await.unwrap();
    server_task.await.unwrap();

    assert_eq!(status.version.name, "Paper 1.16.5");
    assert_eq!(status.version.protocol, 754);
    assert_eq!(status.players.max, 50);
    assert_eq!(status.players.sample[0].name, "Alex");
    assert_eq!(status.description_text(), "A fake server");
    assert!(status.latency.is_some());

    // Subscriptions made for the exchange are gone again.
    assert_eq!(events.listener_count::<PingResult>(), 0);
    assert_eq!(events.listener_count::<Disconnected>(), 0);
    assert_eq!(pinger.session().connection().state(), ConnectionState::Closed);
}

#[tokio::test]
async fn test_ping_can_repeat() {
    let server = FakeServer::bind().await;
    let address = server.address();
    let server_task = tokio::spawn(async move {
        for _ in 0..2 {
            let mut conn = server.accept().await;
            conn.expect_handshake(ConnectionState::Status).await;
            conn.read::<ServerBoundRequest>().await;
            let ping = conn.read::<ServerBoundPing>().await;
            conn.send(&ClientBoundResponse::new(STATUS_JSON)).await;
            conn.send(&ClientBoundPong {
                payload: Long(ping.payload.0),
            })
            .await;
        }
    });

    let pinger = ServerPinger::new(
        &ClientConfig::default(),
        address,
        Arc::new(EventBus::new()),
    )
    .unwrap();
    assert!(pinger.ping().await.is_ok());
    assert!(pinger.ping().await.is_ok());
    server_task.await.unwrap();
}

#[tokio::test]
async fn test_ping_timeout_restarts_connection() {
    let server = FakeServer::bind().await;
    let address = server.address();
    let server_task = tokio::spawn(async move {
        let mut conn = server.accept().await;
        conn.expect_handshake(ConnectionState::Status).await;
        conn.read::<ServerBoundRequest>().await;
        conn.read::<ServerBoundPing>().await;
        // Never answers.
        tokio::time::sleep(Duration::from_secs(2)).await;
    });

    let pinger = ServerPinger::new(
        &ClientConfig::default(),
        address,
        Arc::new(EventBus::new()),
    )
    .unwrap()
    .with_timeout(Duration::from_millis(300));

    let err = pinger.ping().await.unwrap_err();
    assert!(matches!(err, PingError::Timeout(timeout) if timeout == Duration::from_millis(300)));
    assert_eq!(pinger.session().connection().state(), ConnectionState::Idle);
    server_task.abort();
}

#[tokio::test]
async fn test_ping_reports_early_disconnect() {
    let server = FakeServer::bind().await;
    let address = server.address();
    let server_task = tokio::spawn(async move {
        let mut conn = server.accept().await;
        conn.expect_handshake(ConnectionState::Status).await;
        conn.read::<ServerBoundRequest>().await;
        conn.read::<ServerBoundPing>().await;
    });

    let pinger = ServerPinger::new(
        &ClientConfig::default(),
        address,
        Arc::new(EventBus::new()),
    )
    .unwrap();

    let err = pinger.ping().await.unwrap_err();
    server_task.await.unwrap();
    assert!(matches!(err, PingError::Disconnected(_)), "{err}");
}

#[tokio::test]
async fn test_ping_keeps_status_when_pong_never_comes() {
    let server = FakeServer::bind().await;
    let address = server.address();
    let server_task = tokio::spawn(async move {
        let mut conn = server.accept().await;
        conn.expect_handshake(ConnectionState::Status).await;
        conn.read::<ServerBoundRequest>().await;
        conn.read::<ServerBoundPing>().await;
        conn.send(&ClientBoundResponse::new(STATUS_JSON)).await;
        // Closes without a pong.
    });

    let pinger = ServerPinger::new(
        &ClientConfig::default(),
        address,
        Arc::new(EventBus::new()),
    )
    .unwrap();

    let status = pinger.ping().await.unwrap();
    server_task.await.unwrap();
    assert_eq!(status.version.name, "Paper 1.16.5");
    assert_eq!(status.players.online, 2);
    assert!(status.latency.is_none());
}

#[tokio::test]
async fn test_ping_refused_connection() {
    let server = FakeServer::bind().await;
    let address = server.address();
    drop(server);

    let pinger = ServerPinger::new(
        &ClientConfig::default(),
        address,
        Arc::new(EventBus::new()),
    )
    .unwrap();
    let err = pinger.ping().await.unwrap_err();
    assert!(matches!(err, PingError::Connection(_)), "{err}");
}
