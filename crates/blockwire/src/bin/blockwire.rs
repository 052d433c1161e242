//! Blockwire - command-line client
//!
//! Pings servers and joins them with a headless player.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, bail};
use blockwire::config::{Account, ClientConfig, FileProvider, LogType, ServerAddress};
use blockwire::event::{
    ChatReceived, Disconnected, EventBus, JoinWorld, LoginFinished, ServerDisconnect,
    TerrainReady,
};
use blockwire::telemetry::init_subscriber;
use blockwire::{ServerPinger, ServerSession};
use clap::{Parser, Subcommand};
use tokio::sync::watch;
use tracing::{info, warn};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// YAML configuration file. Defaults to `client.yml` when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a server's status and latency
    Ping {
        /// host[:port] or the name of a saved server
        server: String,

        /// Seconds to wait for the status response
        #[arg(long)]
        timeout: Option<u64>,
    },
    /// Log in and follow the session until disconnect or Ctrl-C
    Connect {
        /// host[:port] or the name of a saved server
        server: String,

        /// Join with an offline account of this name
        #[arg(long)]
        username: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = FileProvider::try_load_config(args.config.as_deref())
        .context("failed to load configuration")?;
    if args.debug {
        config.logging.debug = true;
    }
    init_subscriber(&config.logging).context("failed to install the log subscriber")?;

    match args.command {
        Command::Ping { server, timeout } => {
            if let Some(secs) = timeout {
                config.ping_timeout_secs = secs;
            }
            ping(&config, resolve_server(&config, &server)?).await
        }
        Command::Connect { server, username } => {
            if let Some(username) = username {
                config.account = Account::offline(username);
            }
            config.validate()?;
            connect(&config, resolve_server(&config, &server)?).await
        }
    }
}

fn resolve_server(config: &ClientConfig, server: &str) -> anyhow::Result<ServerAddress> {
    if let Some(entry) = config.find_server(server) {
        return Ok(entry.parse_address()?);
    }
    server
        .parse()
        .with_context(|| format!("'{}' is neither a saved server nor an address", server))
}

async fn ping(config: &ClientConfig, address: ServerAddress) -> anyhow::Result<()> {
    let pinger = ServerPinger::new(config, address.clone(), Arc::new(EventBus::new()))?;
    let status = pinger
        .ping()
        .await
        .with_context(|| format!("failed to ping {}", address))?;

    println!("{}", address);
    println!(
        "  version:     {} (protocol {})",
        status.version.name, status.version.protocol
    );
    println!(
        "  players:     {}/{}",
        status.players.online, status.players.max
    );
    for player in &status.players.sample {
        println!("               {}", player.name);
    }
    println!("  description: {}", status.description_text());
    match status.latency {
        Some(latency) => println!("  latency:     {} ms", latency.as_millis()),
        None => println!("  latency:     unknown"),
    }
    Ok(())
}

async fn connect(config: &ClientConfig, address: ServerAddress) -> anyhow::Result<()> {
    let events = Arc::new(EventBus::new());
    let (closed_tx, mut closed_rx) = watch::channel(None::<String>);

    events.on::<LoginFinished, _>(|event| {
        info!(
            log_type = LogType::Events.as_str(),
            "Logged in as {} ({})", event.username, event.uuid
        );
    });
    events.on::<JoinWorld, _>(|event| {
        info!(
            log_type = LogType::Events.as_str(),
            "Joined {} in {:?}, view distance {}",
            event.world.world_name,
            event.game_mode,
            event.world.view_distance
        );
    });
    events.on::<TerrainReady, _>(|event| {
        info!(
            log_type = LogType::Events.as_str(),
            "Spawn at {}, {}, {}", event.spawn.x, event.spawn.y, event.spawn.z
        );
    });
    events.on::<ChatReceived, _>(|event| {
        info!(log_type = LogType::Events.as_str(), "<chat> {}", event.text);
    });
    events.on::<ServerDisconnect, _>(|event| {
        warn!(
            log_type = LogType::Events.as_str(),
            "Server closed the session: {}", event.reason
        );
    });
    events.on::<Disconnected, _>(move |event| {
        let _ = closed_tx.send(Some(event.reason.clone()));
    });

    let session = ServerSession::new(config, address.clone(), events)?;
    session
        .join()
        .await
        .with_context(|| format!("failed to join {}", address))?;

    tokio::select! {
        changed = closed_rx.changed() => {
            if changed.is_err() {
                bail!("event bus dropped before disconnect");
            }
            let reason = closed_rx.borrow().clone().unwrap_or_default();
            info!(log_type = LogType::Session.as_str(), "Session ended: {}", reason);
        }
        result = tokio::signal::ctrl_c() => {
            result.context("failed to listen for Ctrl-C")?;
            info!(log_type = LogType::Session.as_str(), "Interrupted, disconnecting");
            session.disconnect().await;
            // Give the close a moment to reach the server.
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
    }
    Ok(())
}
