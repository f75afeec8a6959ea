//! Completed-session history, stored as one JSON array under a single key.

use std::sync::Arc;

use tracing::{error, info};

use crate::domain::Session;
use crate::store::{KeyValueStore, StoreError, SESSION_HISTORY_KEY};

#[derive(Clone)]
pub struct SessionHistory {
  store: Arc<dyn KeyValueStore>,
}

impl SessionHistory {
  pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
    Self { store }
  }

  /// All stored sessions, oldest first. Unreadable data yields an empty list.
  pub fn load(&self) -> Vec<Session> {
    let raw = match self.store.get(SESSION_HISTORY_KEY) {
      Ok(Some(raw)) => raw,
      Ok(None) => return Vec::new(),
      Err(e) => {
        error!(target: "store", error = %e, "Failed to read session history");
        return Vec::new();
      }
    };
    serde_json::from_str(&raw).unwrap_or_else(|e| {
      error!(target: "store", error = %e, "Session history is corrupt; treating as empty");
      Vec::new()
    })
  }

  pub fn append(&self, session: &Session) -> Result<(), StoreError> {
    let mut sessions = self.load();
    sessions.push(session.clone());
    self.store.set(SESSION_HISTORY_KEY, serde_json::to_string(&sessions)?)?;
    info!(target: "store", id = %session.id, total = sessions.len(), "Session saved to history");
    Ok(())
  }

  pub fn clear(&self) -> Result<(), StoreError> {
    self.store.remove(SESSION_HISTORY_KEY)
  }
}
