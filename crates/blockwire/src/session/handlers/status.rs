use async_trait::async_trait;
use blockwire_config::LogType;
use blockwire_event::PingResult;
use blockwire_protocol::minecraft::java::status::{ClientBoundPong, ClientBoundResponse};
use tracing::debug;

use super::{HandlePacket, HandlerContext};
use crate::core::error::HandlerError;

#[async_trait]
impl HandlePacket for ClientBoundResponse {
    async fn handle(self, ctx: &HandlerContext<'_>) -> Result<(), HandlerError> {
        ctx.expect_state::<Self>()?;
        let status = self.parse()?;
        debug!(
            log_type = LogType::Ping.as_str(),
            "Status: {} ({}), {}/{} players",
            status.version.name,
            status.version.protocol,
            status.players.online,
            status.players.max
        );

        // With a ping outstanding, the result goes out with the pong.
        if let Some(status) = ctx.session.stash_status(status) {
            ctx.events().emit(&PingResult { status });
        }
        Ok(())
    }
}

#[async_trait]
impl HandlePacket for ClientBoundPong {
    async fn handle(self, ctx: &HandlerContext<'_>) -> Result<(), HandlerError> {
        ctx.expect_state::<Self>()?;
        let Some((mut status, latency, matched)) = ctx.session.finish_ping(self.payload.0) else {
            debug!(
                log_type = LogType::Ping.as_str(),
                "Unsolicited pong {}", self.payload.0
            );
            return Ok(());
        };

        if !matched {
            debug!(
                log_type = LogType::Ping.as_str(),
                "Pong payload {} does not match the ping", self.payload.0
            );
        }
        status.latency = Some(latency);
        ctx.events().emit(&PingResult { status });
        Ok(())
    }
}
