//! Framed bincode codec
//!
//! Default on-disk format: a fixed header followed by a checksummed bincode
//! payload.

use crate::error::{PersistError, Result};

use super::{Codec, Entries, HEADER_SIZE, MAGIC, MAX_PAYLOAD_SIZE, VERSION};

/// Single-frame codec with magic, version, length and CRC32
#[derive(Debug, Clone, Copy, Default)]
pub struct FramedCodec;

impl FramedCodec {
    pub fn new() -> Self {
        Self
    }
}

impl Codec for FramedCodec {
    /// Encode the mapping into one frame
    ///
    /// Format: magic (4) + version (2) + payload_len (4) + crc (4) + payload
    fn encode(&self, entries: &Entries) -> Result<Vec<u8>> {
        let payload =
            bincode::serialize(entries).map_err(|e| PersistError::Encode(e.to_string()))?;

        if payload.len() > MAX_PAYLOAD_SIZE as usize {
            return Err(PersistError::Encode(format!(
                "Payload too large: {} bytes (max {})",
                payload.len(),
                MAX_PAYLOAD_SIZE
            )));
        }

        let crc = crc32fast::hash(&payload);

        let mut frame = Vec::with_capacity(HEADER_SIZE + payload.len());
        frame.extend_from_slice(MAGIC);
        frame.extend_from_slice(&VERSION.to_le_bytes());
        frame.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        frame.extend_from_slice(&crc.to_le_bytes());
        frame.extend_from_slice(&payload);

        Ok(frame)
    }

    /// Decode one frame
    ///
    /// An empty slice is a fresh file and yields an empty mapping.
    fn decode(&self, bytes: &[u8]) -> Result<Entries> {
        if bytes.is_empty() {
            return Ok(Entries::new());
        }

        if bytes.len() < HEADER_SIZE {
            return Err(PersistError::Decode(format!(
                "Incomplete header: expected {} bytes, got {}",
                HEADER_SIZE,
                bytes.len()
            )));
        }

        // Parse header
        if &bytes[0..4] != MAGIC {
            return Err(PersistError::Decode(format!(
                "Invalid magic: expected PKV1, got {:?}",
                &bytes[0..4]
            )));
        }

        let version = u16::from_le_bytes([bytes[4], bytes[5]]);
        if version != VERSION {
            return Err(PersistError::Decode(format!(
                "Unsupported format version: {}",
                version
            )));
        }

        let payload_len = u32::from_le_bytes([bytes[6], bytes[7], bytes[8], bytes[9]]);
        let expected_crc = u32::from_le_bytes([bytes[10], bytes[11], bytes[12], bytes[13]]);

        if payload_len > MAX_PAYLOAD_SIZE {
            return Err(PersistError::Decode(format!(
                "Payload too large: {} bytes (max {})",
                payload_len, MAX_PAYLOAD_SIZE
            )));
        }

        // Exactly one frame per file: short means truncated, long means garbage
        let total_len = HEADER_SIZE + payload_len as usize;
        if bytes.len() < total_len {
            return Err(PersistError::Decode(format!(
                "Incomplete payload: expected {} bytes, got {}",
                total_len,
                bytes.len()
            )));
        }
        if bytes.len() > total_len {
            return Err(PersistError::Decode(format!(
                "Trailing data: {} bytes after frame",
                bytes.len() - total_len
            )));
        }

        let payload = &bytes[HEADER_SIZE..total_len];

        let actual_crc = crc32fast::hash(payload);
        if actual_crc != expected_crc {
            return Err(PersistError::Decode(format!(
                "Checksum mismatch: expected {:#010x}, got {:#010x}",
                expected_crc, actual_crc
            )));
        }

        bincode::deserialize(payload).map_err(|e| PersistError::Decode(e.to_string()))
    }
}
