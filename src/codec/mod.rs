//! Codec Module
//!
//! The serializer seam between a [`Store`](crate::Store) and its file.
//!
//! ## Responsibilities
//! - Encode the complete mapping into one self-contained byte image
//! - Decode a byte image back into the mapping, tags intact
//! - Treat zero bytes as "no data yet", never as corruption
//!
//! ## File Format (FramedCodec)
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ Header (14 bytes)                                            │
//! │   Magic: "PKV1" (4) | Version: u16 (2)                       │
//! │   PayloadLen: u32 (4) | PayloadCRC: u32 (4)                  │
//! ├──────────────────────────────────────────────────────────────┤
//! │ Payload (PayloadLen bytes)                                   │
//! │   bincode(BTreeMap<String, Value>)                           │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//! A file holds exactly one frame. Bytes past the frame are corruption.

mod frame;

use std::collections::BTreeMap;

use crate::error::Result;
use crate::value::Value;

pub use frame::FramedCodec;

/// The in-memory mapping mirrored to disk
pub type Entries = BTreeMap<String, Value>;

// =============================================================================
// Shared Constants
// =============================================================================

/// Magic bytes identifying a persistkv file
pub const MAGIC: &[u8; 4] = b"PKV1";

/// Current file format version
pub const VERSION: u16 = 1;

/// Header size: Magic (4) + Version (2) + PayloadLen (4) + CRC (4) = 14 bytes
pub const HEADER_SIZE: usize = 14;

/// Maximum payload size (64 MB)
pub const MAX_PAYLOAD_SIZE: u32 = 64 * 1024 * 1024;

/// Encodes and decodes the whole mapping
///
/// `decode(&[])` must return an empty mapping. Any other input that is not a
/// complete, valid image must fail with [`PersistError::Decode`](crate::PersistError::Decode).
pub trait Codec {
    fn encode(&self, entries: &Entries) -> Result<Vec<u8>>;

    fn decode(&self, bytes: &[u8]) -> Result<Entries>;
}
