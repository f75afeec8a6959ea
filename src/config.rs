//! Loading application configuration (scoring, session, weights, extra
//! questions) from TOML.
//!
//! Every section is optional. A missing or unreadable file yields defaults.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::{Domain, Level, Question};
use crate::weights::WeightsCfg;

pub const CONFIG_PATH_ENV: &str = "COGNIVIEW_CONFIG_PATH";
pub const STORE_PATH_ENV: &str = "COGNIVIEW_STORE_PATH";
pub const DEFAULT_STORE_PATH: &str = "./data/cogniview_store.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("failed to read config file: {0}")]
  Read(#[from] std::io::Error),
  #[error("failed to parse config TOML: {0}")]
  Parse(#[from] toml::de::Error),
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
  #[serde(default)]
  pub scoring: ScoringCfg,
  #[serde(default)]
  pub session: SessionCfg,
  /// Keyed by domain id, e.g. `[weights.software-development]`.
  #[serde(default)]
  pub weights: BTreeMap<String, WeightsCfg>,
  #[serde(default)]
  pub questions: Vec<QuestionCfg>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ScoringCfg {
  pub verification_delay_ms: u64,
  pub verification_timeout_ms: u64,
}

impl Default for ScoringCfg {
  fn default() -> Self {
    Self { verification_delay_ms: 500, verification_timeout_ms: 2000 }
  }
}

impl ScoringCfg {
  pub fn verification_delay(&self) -> Duration {
    Duration::from_millis(self.verification_delay_ms)
  }

  pub fn verification_timeout(&self) -> Duration {
    Duration::from_millis(self.verification_timeout_ms)
  }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SessionCfg {
  pub cooldown_secs: u64,
}

impl Default for SessionCfg {
  fn default() -> Self {
    Self { cooldown_secs: 180 }
  }
}

impl SessionCfg {
  pub fn cooldown(&self) -> Duration {
    Duration::from_secs(self.cooldown_secs)
  }
}

/// Question-bank entry accepted in TOML configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct QuestionCfg {
  #[serde(default)] pub id: Option<String>,
  pub domain: Domain,
  pub level: Level,
  pub question: String,
  #[serde(default)] pub category: Option<String>,
}

impl AppConfig {
  pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
    Ok(toml::from_str(s)?)
  }

  /// Configured questions ready for the bank. Blank entries are skipped.
  pub fn bank_questions(&self) -> Vec<Question> {
    let mut out = Vec::with_capacity(self.questions.len());
    for qc in &self.questions {
      let id = qc.id.clone().unwrap_or_else(|| Uuid::new_v4().to_string());
      let text = qc.question.trim();
      if text.is_empty() {
        error!(target: "cogniview_backend", %id, domain = %qc.domain.id(), "Skipping bank question: empty text");
        continue;
      }
      out.push(Question {
        id,
        domain: qc.domain,
        question: text.to_string(),
        category: qc.category.clone(),
        difficulty: Some(qc.level),
      });
    }
    out
  }
}

/// Loads `AppConfig` from COGNIVIEW_CONFIG_PATH. Any failure falls back to defaults.
pub fn load_app_config_from_env() -> AppConfig {
  let Ok(path) = std::env::var(CONFIG_PATH_ENV) else {
    info!(target: "cogniview_backend", "No {} set; using default configuration", CONFIG_PATH_ENV);
    return AppConfig::default();
  };
  match std::fs::read_to_string(&path).map_err(ConfigError::from).and_then(|s| AppConfig::from_toml(&s)) {
    Ok(cfg) => {
      info!(
        target: "cogniview_backend",
        %path,
        weights = cfg.weights.len(),
        questions = cfg.questions.len(),
        "Loaded app config (TOML)"
      );
      cfg
    }
    Err(e) => {
      error!(target: "cogniview_backend", %path, error = %e, "Failed to load config; using defaults");
      AppConfig::default()
    }
  }
}

/// Store file location from COGNIVIEW_STORE_PATH, or the default.
pub fn store_path_from_env() -> PathBuf {
  match std::env::var(STORE_PATH_ENV) {
    Ok(p) if !p.trim().is_empty() => PathBuf::from(p),
    _ => {
      warn!(target: "cogniview_backend", path = DEFAULT_STORE_PATH, "{} not set; using default store path", STORE_PATH_ENV);
      PathBuf::from(DEFAULT_STORE_PATH)
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_file_gives_defaults() {
    let cfg = AppConfig::from_toml("").unwrap();
    assert_eq!(cfg.scoring.verification_delay(), Duration::from_millis(500));
    assert_eq!(cfg.scoring.verification_timeout(), Duration::from_secs(2));
    assert_eq!(cfg.session.cooldown(), Duration::from_secs(180));
    assert!(cfg.weights.is_empty());
    assert!(cfg.bank_questions().is_empty());
  }

  #[test]
  fn full_file_parses() {
    let cfg = AppConfig::from_toml(
      r#"
[scoring]
verification_delay_ms = 0

[session]
cooldown_secs = 0

[weights.teaching]
confidence = 0.2
technical = 0.2
communication = 0.3
code_quality = 0.0
problem_solving = 0.3

[[questions]]
id = "te_custom_1"
domain = "teaching"
level = "expert"
question = "  How do you run a flipped classroom?  "
category = "methods"

[[questions]]
domain = "teaching"
level = "beginner"
question = "   "
"#,
    )
    .unwrap();
    assert_eq!(cfg.scoring.verification_delay_ms, 0);
    assert_eq!(cfg.scoring.verification_timeout_ms, 2000);
    assert_eq!(cfg.session.cooldown_secs, 0);
    assert!((cfg.weights["teaching"].communication - 0.3).abs() < 1e-9);

    let qs = cfg.bank_questions();
    assert_eq!(qs.len(), 1);
    assert_eq!(qs[0].id, "te_custom_1");
    assert_eq!(qs[0].question, "How do you run a flipped classroom?");
    assert_eq!(qs[0].difficulty, Some(Level::Expert));
  }

  #[test]
  fn missing_id_gets_a_uuid() {
    let cfg = AppConfig::from_toml(
      r#"
[[questions]]
domain = "ux-design"
level = "intermediate"
question = "Walk me through a usability test."
"#,
    )
    .unwrap();
    let qs = cfg.bank_questions();
    assert!(Uuid::parse_str(&qs[0].id).is_ok());
    assert_eq!(qs[0].domain, Domain::UxDesign);
  }

  #[test]
  fn malformed_toml_is_an_error() {
    assert!(matches!(AppConfig::from_toml("[scoring\n"), Err(ConfigError::Parse(_))));
  }
}
