//! # persistkv
//!
//! A minimal embedded key-value store for small amounts of process state:
//! - Primitive values only (string, integer, boolean, float)
//! - One file per store, fully rewritten on every put
//! - Reads served from memory, never from disk
//! - Optional process-wide instance for single-store programs
//!
//! ## Architecture Overview
//!
//! ```text
//!   ┌──────────────┐        ┌──────────────────────────┐
//!   │    global    │──────▶ │          Store           │
//!   │ (one slot)   │        │  entries: BTreeMap (RAM) │
//!   └──────────────┘        └────────────┬─────────────┘
//!                                        │ encode / decode
//!                                        ▼
//!                                 ┌─────────────┐
//!                                 │    Codec    │
//!                                 │ (PKV1 frame)│
//!                                 └──────┬──────┘
//!                                        │ seek · truncate · write
//!                                        ▼
//!                                   [ one file ]
//! ```
//!
//! ## Example
//! ```no_run
//! use persistkv::{must, Store};
//!
//! let mut store = Store::new("mydb.db");
//! must(store.open());
//! store.put("key", "value")?;
//! let value: String = store.get_as("key")?;
//! assert_eq!(value, "value");
//! store.close()?;
//! # Ok::<(), persistkv::PersistError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod value;
pub mod codec;
pub mod store;
pub mod global;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{must, PersistError, Result};
pub use config::{Config, SyncStrategy};
pub use value::{FromValue, Value, ValueKind};
pub use codec::{Codec, Entries, FramedCodec};
pub use store::Store;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of persistkv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
