pub mod clientbound_blockchange;
pub mod clientbound_chat;
pub mod clientbound_chunkdata;
pub mod clientbound_difficulty;
pub mod clientbound_disconnect;
pub mod clientbound_entityrotation;
pub mod clientbound_horsewindow;
pub mod clientbound_joingame;
pub mod clientbound_positionlook;
pub mod clientbound_spawnposition;
pub mod clientbound_timeupdate;
pub mod clientbound_unloadchunk;
pub mod clientbound_vehiclemove;
pub mod keepalive;
pub mod serverbound_chat;
pub mod serverbound_clientstatus;
pub mod serverbound_teleportconfirm;

pub use clientbound_blockchange::ClientBoundBlockChange;
pub use clientbound_chat::{ChatPosition, ClientBoundChatMessage};
pub use clientbound_chunkdata::ClientBoundChunkData;
pub use clientbound_difficulty::{ClientBoundServerDifficulty, Difficulty};
pub use clientbound_disconnect::ClientBoundDisconnect;
pub use clientbound_entityrotation::ClientBoundEntityRotation;
pub use clientbound_horsewindow::ClientBoundOpenHorseWindow;
pub use clientbound_joingame::{ClientBoundJoinGame, GameMode};
pub use clientbound_positionlook::ClientBoundPlayerPositionAndLook;
pub use clientbound_spawnposition::ClientBoundSpawnPosition;
pub use clientbound_timeupdate::ClientBoundTimeUpdate;
pub use clientbound_unloadchunk::ClientBoundUnloadChunk;
pub use clientbound_vehiclemove::ClientBoundVehicleMove;
pub use keepalive::{ClientBoundKeepAlive, ServerBoundKeepAlive};
pub use serverbound_chat::ServerBoundChatMessage;
pub use serverbound_clientstatus::{ClientStatusAction, ServerBoundClientStatus};
pub use serverbound_teleportconfirm::ServerBoundTeleportConfirm;
