use std::cell::RefCell;

use aes::cipher::BlockEncryptMut;
use blockwire_protocol::packet::Result as PacketResult;
use blockwire_protocol::types::{VarInt, WriteToBytes};
use blockwire_protocol::{CompressionState, PacketError, RawPacket};
use bytes::BytesMut;
use libdeflater::{CompressionLvl, Compressor};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::security::encryption::{Aes128Cfb8Enc, Cfb8Closure};

// Compressors are not shared between threads, so keep a small pool per thread.
thread_local! {
    static COMPRESSOR_POOL: RefCell<Vec<Compressor>> = const { RefCell::new(Vec::new()) };
}

fn get_compressor() -> Compressor {
    COMPRESSOR_POOL.with(|pool| {
        pool.borrow_mut()
            .pop()
            .unwrap_or_else(|| Compressor::new(CompressionLvl::default()))
    })
}

fn return_compressor(compressor: Compressor) {
    COMPRESSOR_POOL.with(|pool| {
        let mut pool = pool.borrow_mut();
        if pool.len() < 4 {
            pool.push(compressor);
        }
    });
}

fn zlib_compress(data: &[u8]) -> PacketResult<Vec<u8>> {
    let mut compressor = get_compressor();
    let mut compressed = vec![0u8; compressor.zlib_compress_bound(data.len())];
    let result = compressor
        .zlib_compress(data, &mut compressed)
        .map_err(|e| PacketError::Compression(format!("Compression failed: {:?}", e)));
    return_compressor(compressor);

    compressed.truncate(result?);
    Ok(compressed)
}

/// Frames, compresses and encrypts outgoing packets.
pub struct PacketWriter<W> {
    writer: W,
    encryption: Option<Aes128Cfb8Enc>,
    compression: CompressionState,

    output_buffer: BytesMut,
    compressed_buffer: BytesMut,
}

impl<W: AsyncWrite + Unpin + Send> PacketWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            encryption: None,
            compression: CompressionState::Disabled,

            output_buffer: BytesMut::with_capacity(8192),
            compressed_buffer: BytesMut::with_capacity(8192),
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    pub fn enable_encryption(&mut self, cipher: Aes128Cfb8Enc) {
        self.encryption = Some(cipher);
    }

    pub fn is_encryption_enabled(&self) -> bool {
        self.encryption.is_some()
    }

    pub fn set_compression(&mut self, compression: CompressionState) {
        self.compression = compression;
    }

    pub fn compression(&self) -> CompressionState {
        self.compression
    }

    /// Writes one frame and flushes it.
    ///
    /// With compression on, bodies at or above the threshold are sent as
    /// `[len][data_len][zlib]`, smaller ones as `[len][0][data]`.
    pub async fn write_packet(&mut self, packet: &RawPacket) -> PacketResult<()> {
        self.output_buffer.clear();
        self.compressed_buffer.clear();

        let packet_data = packet.to_frame_data();

        match self.compression {
            CompressionState::Enabled { threshold } => {
                if packet_data.len() >= threshold as usize {
                    let compressed = zlib_compress(&packet_data)?;
                    VarInt(packet_data.len() as i32).write_to_bytes(&mut self.compressed_buffer)?;
                    self.compressed_buffer.extend_from_slice(&compressed);
                } else {
                    VarInt(0).write_to_bytes(&mut self.compressed_buffer)?;
                    self.compressed_buffer.extend_from_slice(&packet_data);
                }

                VarInt(self.compressed_buffer.len() as i32).write_to_bytes(&mut self.output_buffer)?;
                self.output_buffer.extend_from_slice(&self.compressed_buffer);
            }
            CompressionState::Disabled => {
                VarInt(packet_data.len() as i32).write_to_bytes(&mut self.output_buffer)?;
                self.output_buffer.extend_from_slice(&packet_data);
            }
        }

        if let Some(cipher) = &mut self.encryption {
            cipher.encrypt_with_backend_mut(Cfb8Closure {
                data: &mut self.output_buffer,
            });
        }

        self.writer.write_all(&self.output_buffer).await?;
        self.writer.flush().await?;

        Ok(())
    }

    pub async fn close(&mut self) -> PacketResult<()> {
        self.writer.shutdown().await.map_err(PacketError::Io)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockwire_protocol::ProtocolRead;
    use libdeflater::Decompressor;

    #[tokio::test]
    async fn test_write_simple_packet() {
        let mut writer = PacketWriter::new(Vec::new());
        writer
            .write_packet(&RawPacket::new(0, vec![1, 2, 3]))
            .await
            .unwrap();

        let written = writer.into_inner();
        assert_eq!(written, vec![4, 0, 1, 2, 3]);
    }

    #[tokio::test]
    async fn test_below_threshold_is_marked_uncompressed() {
        let mut writer = PacketWriter::new(Vec::new());
        writer.set_compression(CompressionState::Enabled { threshold: 256 });
        writer
            .write_packet(&RawPacket::new(0x10, vec![9; 8]))
            .await
            .unwrap();

        let written = writer.into_inner();
        // [len = 1 + 1 + 8][data_len = 0][id][body]
        assert_eq!(written[0], 10);
        assert_eq!(written[1], 0);
        assert_eq!(written[2], 0x10);
        assert_eq!(&written[3..], &[9; 8]);
    }

    #[tokio::test]
    async fn test_above_threshold_is_compressed() {
        let mut writer = PacketWriter::new(Vec::new());
        writer.set_compression(CompressionState::Enabled { threshold: 64 });
        let body = vec![0xAB; 1000];
        writer
            .write_packet(&RawPacket::new(0x20, body.clone()))
            .await
            .unwrap();

        let written = writer.into_inner();
        let mut frame = &written[..];
        let (VarInt(total), _) = VarInt::read_from(&mut frame).unwrap();
        assert_eq!(total as usize, frame.len());
        let (VarInt(data_len), _) = VarInt::read_from(&mut frame).unwrap();
        assert_eq!(data_len, 1001);
        let mut inflated = vec![0u8; data_len as usize];
        let n = Decompressor::new()
            .zlib_decompress(frame, &mut inflated)
            .unwrap();
        assert_eq!(n, data_len as usize);
        assert_eq!(inflated[0], 0x20);
        assert_eq!(&inflated[1..], &body[..]);
    }
}
