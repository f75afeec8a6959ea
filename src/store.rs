//! String key-value persistence.
//!
//! Values are opaque strings (JSON documents in practice). `JsonFileStore`
//! keeps every key in one JSON object on disk and rewrites the whole file on
//! each write; `MemoryStore` backs tests.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, error, info};

pub const CURRENT_USER_KEY: &str = "cogniview_user";
pub const USERS_KEY: &str = "cogniview_users";
pub const SESSION_HISTORY_KEY: &str = "interview_session_history";
pub const RECHARGE_UNTIL_KEY: &str = "cogniview_recharge_until";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
  #[error("store I/O failed: {0}")]
  Io(#[from] std::io::Error),
  #[error("store encoding failed: {0}")]
  Json(#[from] serde_json::Error),
}

/// Storage abstraction so services can run against disk or memory.
pub trait KeyValueStore: Send + Sync {
  fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
  fn set(&self, key: &str, value: String) -> Result<(), StoreError>;
  fn remove(&self, key: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
  entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }
}

impl KeyValueStore for MemoryStore {
  fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
    Ok(lock(&self.entries).get(key).cloned())
  }

  fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
    lock(&self.entries).insert(key.to_string(), value);
    Ok(())
  }

  fn remove(&self, key: &str) -> Result<(), StoreError> {
    lock(&self.entries).remove(key);
    Ok(())
  }
}

/// One JSON object per file: `{ "<key>": "<value>", ... }`.
#[derive(Debug)]
pub struct JsonFileStore {
  path: PathBuf,
  entries: Mutex<BTreeMap<String, String>>,
}

impl JsonFileStore {
  /// Opens (or lazily creates) the store. A missing file starts empty; an
  /// unreadable or corrupt one is logged and also starts empty.
  pub fn open(path: impl AsRef<Path>) -> Self {
    let path = path.as_ref().to_path_buf();
    let entries = match std::fs::read_to_string(&path) {
      Ok(raw) => match serde_json::from_str::<BTreeMap<String, String>>(&raw) {
        Ok(map) => {
          info!(target: "store", path = %path.display(), keys = map.len(), "Loaded key-value store");
          map
        }
        Err(e) => {
          error!(target: "store", path = %path.display(), error = %e, "Store file is corrupt; starting empty");
          BTreeMap::new()
        }
      },
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
        info!(target: "store", path = %path.display(), "No store file yet; starting empty");
        BTreeMap::new()
      }
      Err(e) => {
        error!(target: "store", path = %path.display(), error = %e, "Failed to read store file; starting empty");
        BTreeMap::new()
      }
    };
    Self { path, entries: Mutex::new(entries) }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Writes `entries` to disk. Callers swap them into memory only on success.
  fn flush(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
    if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
      std::fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(entries)?;
    std::fs::write(&self.path, json)?;
    debug!(target: "store", path = %self.path.display(), keys = entries.len(), "Store flushed");
    Ok(())
  }
}

impl KeyValueStore for JsonFileStore {
  fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
    Ok(lock(&self.entries).get(key).cloned())
  }

  fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
    let mut entries = lock(&self.entries);
    let mut next = entries.clone();
    next.insert(key.to_string(), value);
    self.flush(&next)?;
    *entries = next;
    Ok(())
  }

  fn remove(&self, key: &str) -> Result<(), StoreError> {
    let mut entries = lock(&self.entries);
    if !entries.contains_key(key) {
      return Ok(());
    }
    let mut next = entries.clone();
    next.remove(key);
    self.flush(&next)?;
    *entries = next;
    Ok(())
  }
}

// A poisoned map is still a valid map; keep serving it.
fn lock(m: &Mutex<BTreeMap<String, String>>) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
  m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
