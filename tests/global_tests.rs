//! Tests for the process-wide store
//!
//! All tests share one static slot, so each takes `SERIAL` first and leaves
//! the slot closed.

use parking_lot::Mutex;
use persistkv::{global, PersistError, Value};
use tempfile::TempDir;

static SERIAL: Mutex<()> = parking_lot::const_mutex(());

/// Close whatever a failed assertion in another test may have left open
fn reset() {
    let _ = global::close();
}

// =============================================================================
// Lifecycle Tests
// =============================================================================

#[test]
fn test_global_round_trip() {
    let _guard = SERIAL.lock();
    reset();
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("global.db");

    global::open(&path).unwrap();
    assert!(global::is_open());
    global::put("key", "value").unwrap();
    global::put("count", 3i64).unwrap();
    global::close().unwrap();
    assert!(!global::is_open());

    global::open(&path).unwrap();
    assert_eq!(global::get("key").unwrap(), Value::from("value"));
    assert_eq!(global::get_as::<i64>("count").unwrap(), 3);
    global::close().unwrap();
}

#[test]
fn test_global_uninitialized() {
    let _guard = SERIAL.lock();
    reset();

    assert!(matches!(global::put("k", true), Err(PersistError::NotOpen)));
    assert!(matches!(global::close(), Err(PersistError::NoConnection)));
    assert!(matches!(global::get("k"), Err(PersistError::KeyNotFound(_))));
}

#[test]
fn test_global_single_association() {
    let _guard = SERIAL.lock();
    reset();
    let temp_dir = TempDir::new().unwrap();

    global::open(temp_dir.path().join("first.db")).unwrap();
    let result = global::open(temp_dir.path().join("second.db"));

    assert!(matches!(result, Err(PersistError::AlreadyOpen)));
    assert!(!temp_dir.path().join("second.db").exists());
    global::close().unwrap();
}

#[test]
fn test_global_close_tears_down_memory() {
    let _guard = SERIAL.lock();
    reset();
    let temp_dir = TempDir::new().unwrap();

    global::open(temp_dir.path().join("mem.db")).unwrap();
    global::put("key", "value").unwrap();
    global::close().unwrap();

    assert!(matches!(global::get("key"), Err(PersistError::KeyNotFound(_))));
}

#[test]
fn test_global_failed_open_installs_nothing() {
    let _guard = SERIAL.lock();
    reset();
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("corrupt.db");
    std::fs::write(&path, b"not a store").unwrap();

    assert!(matches!(global::open(&path), Err(PersistError::Decode(_))));
    assert!(!global::is_open());
    assert!(matches!(global::put("k", 1i64), Err(PersistError::NotOpen)));
}
