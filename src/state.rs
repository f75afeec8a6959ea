//! Application state: the key-value store and the services built on it, the
//! scoring pipeline, the question bank and the single interview session.
//!
//! This module owns:
//!   - the store (JSON file in production, memory in tests)
//!   - history, cooldown and auth services sharing that store
//!   - the score synthesizer with its mock verifier
//!   - the question bank (built-in seeds plus configured questions)
//!   - the session manager behind a tokio `Mutex`

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, instrument};

use crate::auth::AuthService;
use crate::config::{load_app_config_from_env, store_path_from_env, AppConfig};
use crate::cooldown::Cooldown;
use crate::history::SessionHistory;
use crate::lexicon::Lexicon;
use crate::scoring::ScoreSynthesizer;
use crate::session::{QuestionBank, SessionManager};
use crate::store::{JsonFileStore, KeyValueStore, StoreError};
use crate::verification::MockVerifier;
use crate::weights::WeightTable;

pub struct AppState {
  pub synthesizer: ScoreSynthesizer<MockVerifier>,
  pub bank: QuestionBank,
  pub manager: Mutex<SessionManager>,
  pub history: SessionHistory,
  pub cooldown: Cooldown,
  pub auth: AuthService,
}

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
  #[error("invalid built-in lexicon: {0}")]
  Lexicon(#[from] regex::Error),
  #[error(transparent)]
  Store(#[from] StoreError),
}

impl AppState {
  /// Build state from env: config file, on-disk store, services.
  /// Signs out any user left over from the previous run.
  #[instrument(level = "info", skip_all)]
  pub fn from_env() -> Result<Self, StartupError> {
    let config = load_app_config_from_env();
    let store = JsonFileStore::open(store_path_from_env());
    info!(target: "cogniview_backend", path = %store.path().display(), "Using JSON store");
    let state = Self::new(config, Arc::new(store), Arc::new(Lexicon::builtin()?));
    state.auth.reset_on_startup()?;
    Ok(state)
  }

  pub fn new(config: AppConfig, store: Arc<dyn KeyValueStore>, lexicon: Arc<Lexicon>) -> Self {
    let verifier = MockVerifier::new(lexicon.clone(), config.scoring.verification_delay());
    let synthesizer = ScoreSynthesizer::new(
      lexicon,
      WeightTable::with_overrides(&config.weights),
      verifier,
      config.scoring.verification_timeout(),
    );

    let mut bank = QuestionBank::builtin();
    let builtin = bank.len();
    bank.extend(config.bank_questions());
    info!(
      target: "cogniview_backend",
      builtin,
      configured = bank.len() - builtin,
      "Question bank ready"
    );

    let history = SessionHistory::new(store.clone());
    let cooldown = Cooldown::new(store.clone(), config.session.cooldown());
    let auth = AuthService::new(store, history.clone());

    Self {
      synthesizer,
      bank,
      manager: Mutex::new(SessionManager::new()),
      history,
      cooldown,
      auth,
    }
  }
}

#[cfg(test)]
pub(crate) mod test_support {
  use super::*;
  use crate::store::MemoryStore;

  /// In-memory state with no verification delay and no cooldown.
  pub fn test_state() -> AppState {
    let mut config = AppConfig::default();
    config.scoring.verification_delay_ms = 0;
    config.session.cooldown_secs = 0;
    test_state_with(config)
  }

  pub fn test_state_with(config: AppConfig) -> AppState {
    let lexicon = Arc::new(Lexicon::builtin().expect("builtin lexicon"));
    AppState::new(config, Arc::new(MemoryStore::new()), lexicon)
  }
}
