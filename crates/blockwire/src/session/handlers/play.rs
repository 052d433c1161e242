use async_trait::async_trait;
use blockwire_config::LogType;
use blockwire_event::{
    ChatReceived, EntityRotationChanged, HorseWindowOpened, JoinWorld, ServerDisconnect, SetBlock,
    TerrainReady, UnloadChunk, UpdateChunk, VehicleMoved, WorldInfo,
};
use blockwire_protocol::minecraft::java::play::*;
use tracing::{debug, info, trace, warn};

use super::{HandlePacket, HandlerContext};
use crate::core::error::HandlerError;

#[async_trait]
impl HandlePacket for ClientBoundJoinGame {
    async fn handle(self, ctx: &HandlerContext<'_>) -> Result<(), HandlerError> {
        ctx.expect_play::<Self>()?;
        let game_mode = self.game_mode();
        let entity_id = self.entity_id.0;

        let world = WorldInfo {
            world_name: self.world_name,
            world_names: self.world_names.0,
            hashed_seed: self.hashed_seed.0,
            max_players: self.max_players.0,
            view_distance: self.view_distance.0,
            hardcore: self.is_hardcore.0,
            debug: self.is_debug.0,
            flat: self.is_flat.0,
            reduced_debug_info: self.reduced_debug_info.0,
            respawn_screen: self.enable_respawn_screen.0,
            difficulty: Difficulty::default(),
            difficulty_locked: false,
            time_of_day: 0,
            world_age: 0,
        };

        ctx.session.update_player(|player| {
            player.entity_id = Some(entity_id);
            player.game_mode = game_mode;
        });
        ctx.session.set_world(world.clone());

        info!(
            log_type = LogType::Session.as_str(),
            "Joined {} as entity {} ({:?})", world.world_name, entity_id, game_mode
        );
        ctx.events().emit(&JoinWorld {
            entity_id,
            game_mode,
            world,
        });
        Ok(())
    }
}

#[async_trait]
impl HandlePacket for ClientBoundKeepAlive {
    async fn handle(self, ctx: &HandlerContext<'_>) -> Result<(), HandlerError> {
        ctx.expect_play::<Self>()?;
        trace!(
            log_type = LogType::Session.as_str(),
            "Keep-alive {}", self.keep_alive_id.0
        );
        ctx.connection
            .send_packet(&ServerBoundKeepAlive::echo(&self))
            .await?;
        Ok(())
    }
}

#[async_trait]
impl HandlePacket for ClientBoundPlayerPositionAndLook {
    async fn handle(self, ctx: &HandlerContext<'_>) -> Result<(), HandlerError> {
        ctx.expect_play::<Self>()?;
        ctx.session.update_player(|player| {
            let (position, rotation) = self.apply(player.position, player.rotation);
            player.position = position;
            player.rotation = rotation;
        });
        ctx.connection
            .send_packet(&ServerBoundTeleportConfirm::new(self.teleport_id.0))
            .await?;
        Ok(())
    }
}

#[async_trait]
impl HandlePacket for ClientBoundSpawnPosition {
    async fn handle(self, ctx: &HandlerContext<'_>) -> Result<(), HandlerError> {
        ctx.expect_play::<Self>()?;
        let spawn = self.location;
        ctx.session.update_player(|player| {
            player.spawn = Some(spawn);
            player.terrain_loaded = true;
        });

        // Tells the server the client is ready to finish joining.
        ctx.connection
            .send_packet(&ServerBoundClientStatus::new(
                ClientStatusAction::PerformRespawn,
            ))
            .await?;
        ctx.events().emit(&TerrainReady { spawn });
        Ok(())
    }
}

#[async_trait]
impl HandlePacket for ClientBoundBlockChange {
    async fn handle(self, ctx: &HandlerContext<'_>) -> Result<(), HandlerError> {
        ctx.expect_play::<Self>()?;
        ctx.events().emit(&SetBlock {
            position: self.location,
            block_state: self.block_id.0,
        });
        Ok(())
    }
}

#[async_trait]
impl HandlePacket for ClientBoundChunkData {
    async fn handle(self, ctx: &HandlerContext<'_>) -> Result<(), HandlerError> {
        ctx.expect_play::<Self>()?;
        trace!(
            log_type = LogType::Session.as_str(),
            "Chunk ({}, {}) with {} sections",
            self.chunk_x.0,
            self.chunk_z.0,
            self.section_count()
        );
        ctx.events().emit(&UpdateChunk {
            chunk_x: self.chunk_x.0,
            chunk_z: self.chunk_z.0,
            full_chunk: self.full_chunk.0,
            primary_bit_mask: self.primary_bit_mask.0,
            data: self.data.0,
        });
        Ok(())
    }
}

#[async_trait]
impl HandlePacket for ClientBoundUnloadChunk {
    async fn handle(self, ctx: &HandlerContext<'_>) -> Result<(), HandlerError> {
        ctx.expect_play::<Self>()?;
        ctx.events().emit(&UnloadChunk {
            chunk_x: self.chunk_x.0,
            chunk_z: self.chunk_z.0,
        });
        Ok(())
    }
}

#[async_trait]
impl HandlePacket for ClientBoundEntityRotation {
    async fn handle(self, ctx: &HandlerContext<'_>) -> Result<(), HandlerError> {
        ctx.expect_play::<Self>()?;
        ctx.events().emit(&EntityRotationChanged {
            entity_id: self.entity_id.0,
            yaw: self.yaw.to_degrees(),
            pitch: self.pitch.to_degrees(),
            on_ground: self.on_ground.0,
        });
        Ok(())
    }
}

#[async_trait]
impl HandlePacket for ClientBoundVehicleMove {
    async fn handle(self, ctx: &HandlerContext<'_>) -> Result<(), HandlerError> {
        ctx.expect_play::<Self>()?;
        ctx.events().emit(&VehicleMoved {
            x: self.x.0,
            y: self.y.0,
            z: self.z.0,
            yaw: self.yaw.0,
            pitch: self.pitch.0,
        });
        Ok(())
    }
}

#[async_trait]
impl HandlePacket for ClientBoundOpenHorseWindow {
    async fn handle(self, ctx: &HandlerContext<'_>) -> Result<(), HandlerError> {
        ctx.expect_play::<Self>()?;
        ctx.events().emit(&HorseWindowOpened {
            window_id: self.window_id.0,
            slot_count: self.slot_count.0,
            entity_id: self.entity_id.0,
        });
        Ok(())
    }
}

#[async_trait]
impl HandlePacket for ClientBoundServerDifficulty {
    async fn handle(self, ctx: &HandlerContext<'_>) -> Result<(), HandlerError> {
        ctx.expect_play::<Self>()?;
        let Some(difficulty) = Difficulty::from_id(self.difficulty.0) else {
            debug!(
                log_type = LogType::Session.as_str(),
                "Unknown difficulty {}", self.difficulty.0
            );
            return Ok(());
        };

        let locked = self.locked.0;
        if !ctx.session.update_world(|world| {
            world.difficulty = difficulty;
            world.difficulty_locked = locked;
        }) {
            debug!(
                log_type = LogType::Session.as_str(),
                "Difficulty received before JoinGame"
            );
        }
        Ok(())
    }
}

#[async_trait]
impl HandlePacket for ClientBoundTimeUpdate {
    async fn handle(self, ctx: &HandlerContext<'_>) -> Result<(), HandlerError> {
        ctx.expect_play::<Self>()?;
        let (world_age, time_of_day) = (self.world_age.0, self.time_of_day.0);
        ctx.session.update_world(|world| {
            world.world_age = world_age;
            world.time_of_day = time_of_day;
        });
        Ok(())
    }
}

#[async_trait]
impl HandlePacket for ClientBoundChatMessage {
    async fn handle(self, ctx: &HandlerContext<'_>) -> Result<(), HandlerError> {
        ctx.expect_play::<Self>()?;
        let text = self.text();
        debug!(log_type = LogType::Session.as_str(), "[chat] {}", text);
        ctx.events().emit(&ChatReceived {
            position: self.position(),
            sender: self.sender.0,
            json: self.json_data.0,
            text,
        });
        Ok(())
    }
}

#[async_trait]
impl HandlePacket for ClientBoundDisconnect {
    async fn handle(self, ctx: &HandlerContext<'_>) -> Result<(), HandlerError> {
        ctx.expect_state::<Self>()?;
        let reason = self.reason_text();
        warn!(
            log_type = LogType::Session.as_str(),
            "Kicked by server: {}", reason
        );
        ctx.events().emit(&ServerDisconnect { reason });
        ctx.connection.close().await;
        Ok(())
    }
}
