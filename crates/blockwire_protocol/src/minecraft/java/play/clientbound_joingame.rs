use crate::packet::packet_fields;
use crate::packet_meta;
use crate::types::{Boolean, Byte, Identifier, Int, Long, Nbt, PrefixedArray, UnsignedByte, VarInt};

pub const CLIENTBOUND_JOIN_GAME_ID: i32 = 0x24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameMode {
    #[default]
    Survival,
    Creative,
    Adventure,
    Spectator,
}

impl GameMode {
    /// `-1` (no previous mode) and unknown ids map to `None`.
    pub fn from_id(id: i8) -> Option<Self> {
        match id {
            0 => Some(GameMode::Survival),
            1 => Some(GameMode::Creative),
            2 => Some(GameMode::Adventure),
            3 => Some(GameMode::Spectator),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientBoundJoinGame {
    pub entity_id: Int,
    pub is_hardcore: Boolean,
    pub gamemode: UnsignedByte,
    pub previous_gamemode: Byte,
    pub world_names: PrefixedArray<Identifier>,
    pub dimension_codec: Nbt,
    pub dimension: Nbt,
    pub world_name: Identifier,
    pub hashed_seed: Long,
    pub max_players: VarInt,
    pub view_distance: VarInt,
    pub reduced_debug_info: Boolean,
    pub enable_respawn_screen: Boolean,
    pub is_debug: Boolean,
    pub is_flat: Boolean,
}

packet_fields!(ClientBoundJoinGame {
    entity_id,
    is_hardcore,
    gamemode,
    previous_gamemode,
    world_names,
    dimension_codec,
    dimension,
    world_name,
    hashed_seed,
    max_players,
    view_distance,
    reduced_debug_info,
    enable_respawn_screen,
    is_debug,
    is_flat,
});
packet_meta!(
    ClientBoundJoinGame,
    CLIENTBOUND_JOIN_GAME_ID,
    Play,
    Clientbound,
    "JoinGame"
);

impl ClientBoundJoinGame {
    pub fn game_mode(&self) -> GameMode {
        // Bit 3 is the hardcore flag on older servers.
        GameMode::from_id((self.gamemode.0 & 0x07) as i8).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ProtocolRead, ProtocolWrite};
    use bytes::BytesMut;
    use fastnbt::Value;
    use std::collections::HashMap;

    fn compound(pairs: &[(&str, Value)]) -> Nbt {
        let map: HashMap<String, Value> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        Nbt(Value::Compound(map))
    }

    #[test]
    fn test_join_game() {
        let packet = ClientBoundJoinGame {
            entity_id: Int(42),
            is_hardcore: Boolean(false),
            gamemode: UnsignedByte(1),
            previous_gamemode: Byte(-1),
            world_names: PrefixedArray(vec![Identifier::parse("minecraft:overworld")]),
            dimension_codec: compound(&[("minecraft:dimension_type", Value::Compound(HashMap::new()))]),
            dimension: compound(&[("natural", Value::Byte(1))]),
            world_name: Identifier::parse("minecraft:overworld"),
            hashed_seed: Long(-123456789),
            max_players: VarInt(20),
            view_distance: VarInt(10),
            reduced_debug_info: Boolean(false),
            enable_respawn_screen: Boolean(true),
            is_debug: Boolean(false),
            is_flat: Boolean(true),
        };

        let mut buffer = BytesMut::new();
        let written = packet.write_to(&mut buffer).unwrap();

        let (decoded, n) = ClientBoundJoinGame::read_from(&mut buffer.freeze()).unwrap();
        assert_eq!(n, written);
        assert_eq!(decoded, packet);
        assert_eq!(decoded.game_mode(), GameMode::Creative);
        assert_eq!(GameMode::from_id(decoded.previous_gamemode.0), None);
    }
}
