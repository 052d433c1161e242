use crate::packet::packet_fields;
use crate::packet_meta;
use crate::types::{Boolean, UnsignedByte};

pub const CLIENTBOUND_SERVER_DIFFICULTY_ID: i32 = 0x0D;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    Peaceful,
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(Difficulty::Peaceful),
            1 => Some(Difficulty::Easy),
            2 => Some(Difficulty::Normal),
            3 => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientBoundServerDifficulty {
    pub difficulty: UnsignedByte,
    pub locked: Boolean,
}

packet_fields!(ClientBoundServerDifficulty { difficulty, locked });
packet_meta!(
    ClientBoundServerDifficulty,
    CLIENTBOUND_SERVER_DIFFICULTY_ID,
    Play,
    Clientbound,
    "ServerDifficulty"
);
