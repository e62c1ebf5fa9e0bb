//! Configuration for persistkv
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Permission bits for a newly created store file (owner read/write,
/// group/other read). Only applied on unix.
pub const DEFAULT_FILE_MODE: u32 = 0o644;

/// Configuration for a single [`Store`](crate::Store)
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // File Configuration
    // -------------------------------------------------------------------------
    /// Location of the backing file. Fixed for the lifetime of a store.
    pub path: PathBuf,

    /// Mode bits used when the file has to be created
    pub file_mode: u32,

    // -------------------------------------------------------------------------
    // Durability Configuration
    // -------------------------------------------------------------------------
    /// When to fsync the backing file
    pub sync_strategy: SyncStrategy,
}

/// Sync strategy: when to force written bytes to stable storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStrategy {
    /// Leave flushing to the OS (fastest, no durability promise)
    Never,

    /// fsync once when the store is closed
    OnClose,

    /// fsync after every put and again on close (safest, slowest)
    EveryWrite,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./persist.db"),
            file_mode: DEFAULT_FILE_MODE,
            sync_strategy: SyncStrategy::Never,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Default config pointed at `path`
    pub fn for_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the backing file path
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.path = path.into();
        self
    }

    /// Set the mode bits used when creating the file
    pub fn file_mode(mut self, mode: u32) -> Self {
        self.config.file_mode = mode;
        self
    }

    /// Set the sync strategy
    pub fn sync_strategy(mut self, strategy: SyncStrategy) -> Self {
        self.config.sync_strategy = strategy;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
