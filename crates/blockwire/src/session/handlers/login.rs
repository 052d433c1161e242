use async_trait::async_trait;
use blockwire_config::LogType;
use blockwire_event::{LoginFinished, ServerDisconnect};
use blockwire_protocol::ConnectionState;
use blockwire_protocol::minecraft::java::login::{
    ClientBoundEncryptionRequest, ClientBoundLoginDisconnect, ClientBoundLoginSuccess,
    ClientBoundPluginRequest, ClientBoundSetCompression, ServerBoundEncryptionResponse,
    ServerBoundPluginResponse,
};
use tracing::{debug, info, warn};

use super::{HandlePacket, HandlerContext};
use crate::core::error::{AuthError, HandlerError};
use crate::security::EncryptionState;

#[async_trait]
impl HandlePacket for ClientBoundLoginDisconnect {
    async fn handle(self, ctx: &HandlerContext<'_>) -> Result<(), HandlerError> {
        ctx.expect_state::<Self>()?;
        let reason = self.reason_text();
        warn!(
            log_type = LogType::Session.as_str(),
            "Login refused: {}", reason
        );
        ctx.events().emit(&ServerDisconnect { reason });
        ctx.connection.close().await;
        Ok(())
    }
}

#[async_trait]
impl HandlePacket for ClientBoundEncryptionRequest {
    async fn handle(self, ctx: &HandlerContext<'_>) -> Result<(), HandlerError> {
        ctx.expect_state::<Self>()?;
        let account = ctx.session.account();
        if !account.is_online() {
            warn!(
                log_type = LogType::Authentication.as_str(),
                "Server requires authentication but '{}' is an offline account, closing",
                account.username()
            );
            ctx.connection.close().await;
            return Ok(());
        }

        let encryption =
            EncryptionState::try_new_with_server_data(self.public_key.0, self.verify_token.0)
                .map_err(AuthError::from)?;
        let server_hash = encryption.compute_server_id_hash(self.server_id.as_str());

        if let Err(e) = ctx
            .session
            .authenticator()
            .join_server(account, &server_hash)
            .await
        {
            ctx.connection.close().await;
            return Err(e.into());
        }

        let response = ServerBoundEncryptionResponse::new(
            encryption.encrypt_shared_secret().map_err(AuthError::from)?,
            encryption.encrypt_verify_token().map_err(AuthError::from)?,
        );
        ctx.connection.send_packet(&response).await?;
        ctx.connection
            .enable_encryption(encryption.shared_secret())
            .await?;
        Ok(())
    }
}

#[async_trait]
impl HandlePacket for ClientBoundSetCompression {
    async fn handle(self, ctx: &HandlerContext<'_>) -> Result<(), HandlerError> {
        ctx.expect_state::<Self>()?;
        ctx.connection.enable_compression(self.threshold.0).await?;
        Ok(())
    }
}

#[async_trait]
impl HandlePacket for ClientBoundPluginRequest {
    async fn handle(self, ctx: &HandlerContext<'_>) -> Result<(), HandlerError> {
        ctx.expect_state::<Self>()?;
        debug!(
            log_type = LogType::Session.as_str(),
            "Declining login plugin request {} on {}", self.message_id.0, self.channel
        );
        ctx.connection
            .send_packet(&ServerBoundPluginResponse::not_understood(self.message_id.0))
            .await?;
        Ok(())
    }
}

#[async_trait]
impl HandlePacket for ClientBoundLoginSuccess {
    async fn handle(self, ctx: &HandlerContext<'_>) -> Result<(), HandlerError> {
        ctx.expect_state::<Self>()?;
        let uuid = self.uuid.0;
        let username = self.username.0;

        ctx.session.update_player(|player| {
            player.uuid = Some(uuid);
            player.username = username.clone();
        });
        ctx.connection.transition(ConnectionState::Play)?;

        info!(
            log_type = LogType::Session.as_str(),
            "Logged in as {} ({})", username, uuid
        );
        ctx.events().emit(&LoginFinished { uuid, username });
        Ok(())
    }
}
