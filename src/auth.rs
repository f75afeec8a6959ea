//! Local account registry and the signed-in user.
//!
//! Accounts live in the key-value store under `cogniview_users`; the active
//! user (without password) under `cogniview_user`. Passwords are stored as
//! given, matching the existing on-disk layout. This is a practice app with a
//! single local user, not an identity provider.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::history::SessionHistory;
use crate::store::{KeyValueStore, StoreError, CURRENT_USER_KEY, USERS_KEY};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
  pub id: String,
  pub name: String,
  pub email: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub avatar: Option<String>,
  pub joined_date: DateTime<Utc>,
}

/// Registry entry: the public profile plus the password.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct StoredUser {
  #[serde(flatten)]
  user: User,
  password: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
  #[error("name, email and password are required")]
  MissingFields,
  #[error("email already in use")]
  EmailTaken,
  #[error("invalid email or password")]
  InvalidCredentials,
  #[error(transparent)]
  Store(#[from] StoreError),
}

#[derive(Clone)]
pub struct AuthService {
  store: Arc<dyn KeyValueStore>,
  history: SessionHistory,
}

impl AuthService {
  pub fn new(store: Arc<dyn KeyValueStore>, history: SessionHistory) -> Self {
    Self { store, history }
  }

  /// Signs out whoever was active when the process last ran.
  pub fn reset_on_startup(&self) -> Result<(), StoreError> {
    self.store.remove(CURRENT_USER_KEY)
  }

  #[instrument(level = "info", skip(self, name, password))]
  pub fn register(&self, name: &str, email: &str, password: &str) -> Result<User, AuthError> {
    let (name, email) = (name.trim(), email.trim());
    if name.is_empty() || email.is_empty() || password.is_empty() {
      return Err(AuthError::MissingFields);
    }
    let mut users = self.users();
    if users.iter().any(|u| u.user.email == email) {
      warn!(target: "auth", "Registration rejected: email already in use");
      return Err(AuthError::EmailTaken);
    }

    let user = User {
      id: format!("user-{}", Uuid::new_v4()),
      name: name.to_string(),
      email: email.to_string(),
      avatar: Some(format!("https://ui-avatars.com/api/?name={}&background=random", urlencoding::encode(name))),
      joined_date: Utc::now(),
    };
    users.push(StoredUser { user: user.clone(), password: password.to_string() });
    self.store.set(USERS_KEY, serde_json::to_string(&users).map_err(StoreError::from)?)?;
    self.set_current(&user)?;
    // a new account starts with a clean slate
    self.history.clear()?;
    info!(target: "auth", id = %user.id, "User registered");
    Ok(user)
  }

  #[instrument(level = "info", skip(self, password))]
  pub fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
      return Err(AuthError::MissingFields);
    }
    let found = self
      .users()
      .into_iter()
      .find(|u| u.user.email == email && u.password == password)
      .ok_or(AuthError::InvalidCredentials)?;
    self.set_current(&found.user)?;
    info!(target: "auth", id = %found.user.id, "User signed in");
    Ok(found.user)
  }

  pub fn logout(&self) -> Result<(), StoreError> {
    self.store.remove(CURRENT_USER_KEY)?;
    info!(target: "auth", "User signed out");
    Ok(())
  }

  pub fn current_user(&self) -> Option<User> {
    let raw = match self.store.get(CURRENT_USER_KEY) {
      Ok(raw) => raw?,
      Err(e) => {
        error!(target: "auth", error = %e, "Failed to read current user");
        return None;
      }
    };
    serde_json::from_str(&raw)
      .map_err(|e| error!(target: "auth", error = %e, "Current user record is corrupt"))
      .ok()
  }

  pub fn is_authenticated(&self) -> bool {
    self.current_user().is_some()
  }

  fn set_current(&self, user: &User) -> Result<(), StoreError> {
    self.store.set(CURRENT_USER_KEY, serde_json::to_string(user)?)
  }

  fn users(&self) -> Vec<StoredUser> {
    match self.store.get(USERS_KEY) {
      Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
        error!(target: "auth", error = %e, "User registry is corrupt; treating as empty");
        Vec::new()
      }),
      Ok(None) => Vec::new(),
      Err(e) => {
        error!(target: "auth", error = %e, "Failed to read user registry");
        Vec::new()
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{Domain, Level, Session};
  use crate::store::{MemoryStore, SESSION_HISTORY_KEY};

  fn service() -> (AuthService, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let history = SessionHistory::new(store.clone());
    (AuthService::new(store.clone(), history), store)
  }

  #[test]
  fn register_signs_in_and_hides_password() {
    let (auth, store) = service();
    let user = auth.register("Ada Lovelace", "ada@example.com", "engine").unwrap();
    assert!(user.id.starts_with("user-"));
    assert_eq!(user.avatar.as_deref(), Some("https://ui-avatars.com/api/?name=Ada%20Lovelace&background=random"));
    assert_eq!(auth.current_user(), Some(user));

    let current = store.get(CURRENT_USER_KEY).unwrap().unwrap();
    assert!(!current.contains("engine"));
    let registry = store.get(USERS_KEY).unwrap().unwrap();
    assert!(registry.contains("\"password\":\"engine\""));
    assert!(registry.contains("joinedDate"));
  }

  #[test]
  fn duplicate_email_and_blank_fields_are_rejected() {
    let (auth, _) = service();
    auth.register("Ada", "ada@example.com", "pw").unwrap();
    assert!(matches!(auth.register("Other", "ada@example.com", "pw2"), Err(AuthError::EmailTaken)));
    assert!(matches!(auth.register(" ", "x@example.com", "pw"), Err(AuthError::MissingFields)));
  }

  #[test]
  fn login_checks_password_and_logout_clears() {
    let (auth, _) = service();
    auth.register("Ada", "ada@example.com", "pw").unwrap();
    auth.logout().unwrap();
    assert!(!auth.is_authenticated());
    assert!(matches!(auth.login("ada@example.com", "nope"), Err(AuthError::InvalidCredentials)));
    assert!(matches!(auth.login("bob@example.com", "pw"), Err(AuthError::InvalidCredentials)));
    let user = auth.login("ada@example.com", "pw").unwrap();
    assert_eq!(user.name, "Ada");
    assert!(auth.is_authenticated());
  }

  #[test]
  fn registering_clears_history() {
    let (auth, store) = service();
    let history = SessionHistory::new(store.clone());
    history
      .append(&Session {
        id: "session-old".into(),
        domain: Domain::Teaching,
        difficulty_level: Level::Beginner,
        start_time: Utc::now(),
        end_time: None,
        questions: vec![],
        answers: Default::default(),
        feedback: None,
      })
      .unwrap();
    auth.register("New", "new@example.com", "pw").unwrap();
    assert_eq!(store.get(SESSION_HISTORY_KEY).unwrap(), None);
  }

  #[test]
  fn startup_reset_signs_out() {
    let (auth, _) = service();
    auth.register("Ada", "ada@example.com", "pw").unwrap();
    auth.reset_on_startup().unwrap();
    assert_eq!(auth.current_user(), None);
  }
}
