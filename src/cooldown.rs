//! Recharge period between completed sessions.
//!
//! The deadline is stored as epoch milliseconds under `cogniview_recharge_until`
//! so it survives restarts. Expired entries are removed when read.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::session::SessionError;
use crate::store::{KeyValueStore, StoreError, RECHARGE_UNTIL_KEY};

#[derive(Clone)]
pub struct Cooldown {
  store: Arc<dyn KeyValueStore>,
  period: Duration,
}

impl Cooldown {
  pub fn new(store: Arc<dyn KeyValueStore>, period: Duration) -> Self {
    Self { store, period }
  }

  /// Starts the recharge window at `now`. A zero period disables it.
  pub fn start(&self, now: DateTime<Utc>) -> Result<(), StoreError> {
    if self.period.is_zero() {
      return Ok(());
    }
    let until = now.timestamp_millis() + self.period.as_millis() as i64;
    self.store.set(RECHARGE_UNTIL_KEY, until.to_string())?;
    info!(target: "session", secs = self.period.as_secs(), "Recharge period started");
    Ok(())
  }

  /// Seconds left (rounded up), or `None` when no window is active.
  pub fn remaining_secs(&self, now: DateTime<Utc>) -> Result<Option<u64>, StoreError> {
    let Some(raw) = self.store.get(RECHARGE_UNTIL_KEY)? else { return Ok(None) };
    let until = match raw.trim().parse::<i64>() {
      Ok(v) => v,
      Err(e) => {
        warn!(target: "store", value = %raw, error = %e, "Unreadable recharge deadline; clearing");
        self.store.remove(RECHARGE_UNTIL_KEY)?;
        return Ok(None);
      }
    };
    let left_ms = until - now.timestamp_millis();
    if left_ms > 0 {
      Ok(Some(((left_ms + 999) / 1000) as u64))
    } else {
      self.store.remove(RECHARGE_UNTIL_KEY)?;
      Ok(None)
    }
  }

  /// Fails with `Recharging` while a window is active. Store errors are
  /// logged and treated as "no window" so a bad disk never blocks practice.
  pub fn ensure_ready(&self, now: DateTime<Utc>) -> Result<(), SessionError> {
    match self.remaining_secs(now) {
      Ok(Some(remaining_secs)) => Err(SessionError::Recharging { remaining_secs }),
      Ok(None) => Ok(()),
      Err(e) => {
        warn!(target: "store", error = %e, "Could not read recharge deadline");
        Ok(())
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;
  use crate::store::MemoryStore;

  fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
  }

  #[test]
  fn window_blocks_then_expires() {
    let store = Arc::new(MemoryStore::new());
    let cd = Cooldown::new(store.clone(), Duration::from_secs(180));
    assert_eq!(cd.ensure_ready(at(0)), Ok(()));

    cd.start(at(0)).unwrap();
    assert_eq!(cd.remaining_secs(at(30)).unwrap(), Some(150));
    assert_eq!(cd.ensure_ready(at(179)), Err(SessionError::Recharging { remaining_secs: 1 }));
    let almost = Utc.timestamp_millis_opt((1_700_000_000 + 179) * 1000 + 999).unwrap();
    assert_eq!(cd.remaining_secs(almost).unwrap(), Some(1));

    assert_eq!(cd.remaining_secs(at(180)).unwrap(), None);
    assert_eq!(store.get(RECHARGE_UNTIL_KEY).unwrap(), None);
  }

  #[test]
  fn zero_period_never_blocks() {
    let cd = Cooldown::new(Arc::new(MemoryStore::new()), Duration::ZERO);
    cd.start(at(0)).unwrap();
    assert_eq!(cd.ensure_ready(at(0)), Ok(()));
  }

  #[test]
  fn garbage_deadline_is_cleared() {
    let store = Arc::new(MemoryStore::new());
    store.set(RECHARGE_UNTIL_KEY, "soon".into()).unwrap();
    let cd = Cooldown::new(store.clone(), Duration::from_secs(180));
    assert_eq!(cd.remaining_secs(at(0)).unwrap(), None);
    assert_eq!(store.get(RECHARGE_UNTIL_KEY).unwrap(), None);
  }
}
