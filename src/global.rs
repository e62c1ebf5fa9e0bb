//! Process-wide store
//!
//! Convenience wrapper around a single [`Store`] for programs that only ever
//! need one. `open` installs it, `close` tears it down; at most one file is
//! associated at a time. Semantics match the instance API.

use std::path::PathBuf;

use parking_lot::{const_mutex, Mutex};

use crate::config::Config;
use crate::error::{PersistError, Result};
use crate::store::Store;
use crate::value::{FromValue, Value};

static STORE: Mutex<Option<Store>> = const_mutex(None);

/// Open the process-wide store at `path` with default settings
pub fn open(path: impl Into<PathBuf>) -> Result<()> {
    open_with_config(Config::for_path(path))
}

/// Open the process-wide store from a full config
///
/// Fails with `AlreadyOpen` while another file is associated. Nothing is
/// installed if the open fails.
pub fn open_with_config(config: Config) -> Result<()> {
    let mut slot = STORE.lock();
    if slot.is_some() {
        return Err(PersistError::AlreadyOpen);
    }

    let mut store = Store::with_config(config);
    store.open()?;
    *slot = Some(store);
    Ok(())
}

pub fn put(key: &str, value: impl Into<Value>) -> Result<()> {
    STORE
        .lock()
        .as_mut()
        .ok_or(PersistError::NotOpen)?
        .put(key, value)
}

/// Without an open store every key is missing
pub fn get(key: &str) -> Result<Value> {
    match STORE.lock().as_ref() {
        Some(store) => store.get(key),
        None => Err(PersistError::KeyNotFound(key.to_string())),
    }
}

pub fn get_as<T: FromValue>(key: &str) -> Result<T> {
    match STORE.lock().as_ref() {
        Some(store) => store.get_as(key),
        None => Err(PersistError::KeyNotFound(key.to_string())),
    }
}

/// Close and drop the process-wide store
///
/// The slot is emptied even if the final sync fails.
pub fn close() -> Result<()> {
    let store = STORE.lock().take();
    match store {
        Some(mut store) => store.close(),
        None => Err(PersistError::NoConnection),
    }
}

pub fn is_open() -> bool {
    STORE.lock().is_some()
}
