use crate::packet::packet_fields;
use crate::packet_meta;
use crate::types::{Boolean, Int, RemainingBytes, VarInt};

pub const CLIENTBOUND_CHUNK_DATA_ID: i32 = 0x20;

/// Only the header is decoded. Heightmaps, biomes, section data and block
/// entities stay in `data` for whoever stores chunks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientBoundChunkData {
    pub chunk_x: Int,
    pub chunk_z: Int,
    pub full_chunk: Boolean,
    pub primary_bit_mask: VarInt,
    pub data: RemainingBytes,
}

packet_fields!(ClientBoundChunkData {
    chunk_x,
    chunk_z,
    full_chunk,
    primary_bit_mask,
    data,
});
packet_meta!(
    ClientBoundChunkData,
    CLIENTBOUND_CHUNK_DATA_ID,
    Play,
    Clientbound,
    "ChunkData"
);

impl ClientBoundChunkData {
    /// Number of 16-block-high sections carried by this packet.
    pub fn section_count(&self) -> u32 {
        (self.primary_bit_mask.0 as u32).count_ones()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProtocolRead;
    use bytes::Bytes;

    #[test]
    fn test_chunk_header() {
        let mut body = Bytes::from_static(&[
            0xff, 0xff, 0xff, 0xfe, // x = -2
            0x00, 0x00, 0x00, 0x03, // z = 3
            0x01, // full chunk
            0x0b, // sections 0, 1, 3
            0xaa, 0xbb,
        ]);
        let (chunk, n) = ClientBoundChunkData::read_from(&mut body).unwrap();
        assert_eq!(n, 12);
        assert_eq!((chunk.chunk_x.0, chunk.chunk_z.0), (-2, 3));
        assert!(chunk.full_chunk.0);
        assert_eq!(chunk.section_count(), 3);
        assert_eq!(&chunk.data.0[..], &[0xaa, 0xbb]);
    }
}
