use aes::cipher::BlockDecryptMut;
use blockwire_protocol::packet::{MAX_FRAME_LENGTH, MAX_UNCOMPRESSED_LENGTH, Result as PacketResult};
use blockwire_protocol::types::{ProtocolRead, VarInt};
use blockwire_protocol::{CompressionState, PacketError, RawPacket};
use bytes::{Buf, Bytes};
use libdeflater::Decompressor;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::security::encryption::{Aes128Cfb8Dec, Cfb8Closure};

const MAX_LENGTH_PREFIX_BYTES: usize = 5;

/// Whether the stream is still aligned on a frame boundary after `err`.
///
/// Compression and codec failures happen after the whole frame has been
/// consumed, so only that packet is lost.
pub fn is_recoverable(err: &PacketError) -> bool {
    matches!(err, PacketError::Compression(_) | PacketError::Codec(_))
}

/// Reads frames, decrypting and inflating them as configured.
pub struct PacketReader<R> {
    reader: R,
    encryption: Option<Aes128Cfb8Dec>,
    compression: CompressionState,
}

impl<R: AsyncRead + Unpin> PacketReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            encryption: None,
            compression: CompressionState::Disabled,
        }
    }

    pub fn is_encryption_enabled(&self) -> bool {
        self.encryption.is_some()
    }

    pub fn enable_encryption(&mut self, cipher: Aes128Cfb8Dec) {
        self.encryption = Some(cipher);
    }

    pub fn set_compression(&mut self, compression: CompressionState) {
        self.compression = compression;
    }

    pub fn compression(&self) -> CompressionState {
        self.compression
    }

    pub async fn read_packet(&mut self) -> PacketResult<RawPacket> {
        let packet_length = self.read_frame_length().await?;

        let mut data = vec![0u8; packet_length];
        self.reader.read_exact(&mut data).await?;

        if let Some(cipher) = &mut self.encryption {
            cipher.decrypt_with_backend_mut(Cfb8Closure { data: &mut data });
        }

        let frame = match self.compression {
            CompressionState::Enabled { .. } => inflate(Bytes::from(data))?,
            CompressionState::Disabled => Bytes::from(data),
        };

        Ok(RawPacket::from_frame_data(frame)?)
    }

    /// The length prefix is decrypted one byte at a time since its size is
    /// only known once the last byte has been seen.
    async fn read_frame_length(&mut self) -> PacketResult<usize> {
        let mut value: u32 = 0;
        for position in 0..MAX_LENGTH_PREFIX_BYTES {
            let mut byte = [self.reader.read_u8().await?];
            if let Some(cipher) = &mut self.encryption {
                cipher.decrypt_with_backend_mut(Cfb8Closure { data: &mut byte });
            }

            value |= ((byte[0] & 0x7F) as u32) << (7 * position);
            if byte[0] & 0x80 == 0 {
                let length = value as i32;
                if length < 0 || length as usize > MAX_FRAME_LENGTH {
                    return Err(PacketError::InvalidLength {
                        length: value as usize,
                        max: MAX_FRAME_LENGTH,
                    });
                }
                return Ok(length as usize);
            }
        }

        Err(PacketError::Other(format!(
            "Frame length prefix longer than {} bytes",
            MAX_LENGTH_PREFIX_BYTES
        )))
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

/// `varint(data_length) body`, where a zero length means `body` was sent
/// uncompressed.
fn inflate(mut data: Bytes) -> PacketResult<Bytes> {
    let (VarInt(data_length), _) = VarInt::read_from(&mut data)?;
    if data_length == 0 {
        return Ok(data);
    }
    if data_length < 0 || data_length as usize > MAX_UNCOMPRESSED_LENGTH {
        return Err(PacketError::InvalidLength {
            length: data_length as u32 as usize,
            max: MAX_UNCOMPRESSED_LENGTH,
        });
    }

    let mut outbuf = vec![0u8; data_length as usize];
    let written = Decompressor::new()
        .zlib_decompress(data.chunk(), &mut outbuf)
        .map_err(|e| PacketError::Compression(format!("Decompression failed: {:?}", e)))?;

    if written != data_length as usize {
        return Err(PacketError::Compression(format!(
            "Decompressed length mismatch: expected {}, got {}",
            data_length, written
        )));
    }

    Ok(Bytes::from(outbuf))
}
