//! Store Module
//!
//! The in-memory mapping plus the single file it is mirrored to.
//!
//! ## Responsibilities
//! - Load the whole file into memory on open (empty file = empty mapping)
//! - Rewrite the whole file on every put
//! - Serve reads from memory only
//! - Release the file handle on close
//!
//! ## Write Protocol
//! ```text
//! put(k, v):
//!   1. entries[k] = v              (memory)
//!   2. image = codec.encode(entries)
//!   3. seek(0)
//!   4. set_len(0)                  (no stale tail from a longer image)
//!   5. write_all(image), flush     (+ sync_data with EveryWrite)
//! ```
//! A failure in steps 2-5 leaves memory ahead of disk. Nothing is rolled
//! back; the next successful put or a fresh open brings them back in line.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::codec::{Codec, Entries, FramedCodec};
use crate::config::{Config, SyncStrategy};
use crate::error::{PersistError, Result};
use crate::value::{FromValue, Value};

/// A key-value store backed by one file
///
/// ## Concurrency Model
///
/// None. Mutating calls take `&mut self`, so sharing a store between threads
/// requires the caller to wrap it (e.g. in a `Mutex`). Two stores, or two
/// processes, on the same file will overwrite each other; no file lock is
/// taken.
#[derive(Debug)]
pub struct Store<C = FramedCodec> {
    /// Store configuration (path is fixed here)
    config: Config,

    /// Open handle; `None` before open and after close
    file: Option<File>,

    /// Decoded mapping, source of truth for reads
    entries: Entries,

    /// Serializer used for the whole-file image
    codec: C,
}

impl Store<FramedCodec> {
    /// Create a store for `path` with default settings
    ///
    /// Pure construction, no I/O happens until [`Store::open`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_config(Config::for_path(path))
    }

    /// Create a store from a full config
    pub fn with_config(config: Config) -> Self {
        Self::with_codec(config, FramedCodec::new())
    }
}

impl<C: Codec> Store<C> {
    /// Create a store that uses a custom serializer
    pub fn with_codec(config: Config, codec: C) -> Self {
        Self {
            config,
            file: None,
            entries: Entries::new(),
            codec,
        }
    }

    /// Open (creating if absent) the backing file and load its contents
    ///
    /// On startup:
    /// 1. Open the file read/write, creating it with `file_mode` if missing
    /// 2. Read every byte
    /// 3. Decode; zero bytes decode to an empty mapping
    ///
    /// If any step fails the store stays closed with an empty mapping.
    pub fn open(&mut self) -> Result<()> {
        if self.file.is_some() {
            return Err(PersistError::AlreadyOpen);
        }

        match self.load() {
            Ok((file, entries, bytes_read)) => {
                tracing::debug!(
                    "Opened {} ({} bytes, {} entries)",
                    self.config.path.display(),
                    bytes_read,
                    entries.len()
                );
                self.file = Some(file);
                self.entries = entries;
                Ok(())
            }
            Err(e) => {
                self.entries.clear();
                Err(e)
            }
        }
    }

    fn load(&self) -> Result<(File, Entries, usize)> {
        let mut file = open_options(&self.config).open(&self.config.path)?;

        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;

        let entries = self.codec.decode(&bytes)?;
        Ok((file, entries, bytes.len()))
    }

    /// Store `value` under `key` and rewrite the whole file
    ///
    /// Last write wins. The in-memory insert happens first and is kept even
    /// if the rewrite fails.
    pub fn put(&mut self, key: &str, value: impl Into<Value>) -> Result<()> {
        let file = self.file.as_mut().ok_or(PersistError::NotOpen)?;

        self.entries.insert(key.to_string(), value.into());

        let sync = self.config.sync_strategy == SyncStrategy::EveryWrite;
        let result = self.codec.encode(&self.entries).and_then(|image| {
            rewrite(file, &image, sync)?;
            Ok(image.len())
        });

        match result {
            Ok(bytes_written) => {
                tracing::debug!("Put {:?} ({} bytes written)", key, bytes_written);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(
                    "Put {:?} failed after in-memory update, {} may be stale: {}",
                    key,
                    self.config.path.display(),
                    e
                );
                Err(e)
            }
        }
    }

    /// Get a copy of the value stored under `key`
    ///
    /// Reads memory only; works whether or not the store is open.
    pub fn get(&self, key: &str) -> Result<Value> {
        tracing::trace!("Get {:?}", key);
        self.entries
            .get(key)
            .cloned()
            .ok_or_else(|| PersistError::KeyNotFound(key.to_string()))
    }

    /// Get the value under `key` as a concrete type
    ///
    /// Fails with `TypeMismatch` if the stored kind differs from `T`.
    pub fn get_as<T: FromValue>(&self, key: &str) -> Result<T> {
        let value = self.get(key)?;
        T::from_value(value).map_err(|found| PersistError::TypeMismatch {
            key: key.to_string(),
            expected: T::KIND,
            found: found.kind(),
        })
    }

    /// Fill `dest` with the value under `key`
    ///
    /// `dest` is left untouched on any error.
    pub fn get_into<T: FromValue>(&self, key: &str, dest: &mut T) -> Result<()> {
        *dest = self.get_as(key)?;
        Ok(())
    }

    /// Release the file handle
    ///
    /// With `OnClose`/`EveryWrite` the file is fsynced first. The handle is
    /// released even when that sync fails.
    pub fn close(&mut self) -> Result<()> {
        let file = self.file.take().ok_or(PersistError::NoConnection)?;

        if self.config.sync_strategy != SyncStrategy::Never {
            file.sync_all()?;
        }

        tracing::debug!("Closed {}", self.config.path.display());
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the backing file path
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys in sorted order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries in sorted key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Replace the file's contents with `image`
fn rewrite(file: &mut File, image: &[u8], sync: bool) -> io::Result<()> {
    file.seek(SeekFrom::Start(0))?;
    file.set_len(0)?;
    file.write_all(image)?;
    file.flush()?;

    if sync {
        file.sync_data()?;
    }

    Ok(())
}

fn open_options(config: &Config) -> OpenOptions {
    let mut options = OpenOptions::new();
    options.read(true).write(true).create(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(config.file_mode);
    }
    #[cfg(not(unix))]
    let _ = config;

    options
}
