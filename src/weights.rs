//! Per-domain weights for the overall answer score.
//!
//! A `DomainWeights` can only be built through `DomainWeights::new`, which
//! enforces that the five weights are finite, non-negative and sum to 1.0.

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::{error, info};

use crate::domain::Domain;

const SUM_TOLERANCE: f64 = 1e-6;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DomainWeights {
  confidence: f64,
  technical: f64,
  communication: f64,
  code_quality: f64,
  problem_solving: f64,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum WeightsError {
  #[error("weight `{name}` must be a finite non-negative number, got {value}")]
  InvalidWeight { name: &'static str, value: f64 },
  #[error("weights must sum to 1.0, got {sum}")]
  BadSum { sum: f64 },
}

impl DomainWeights {
  pub fn new(
    confidence: f64,
    technical: f64,
    communication: f64,
    code_quality: f64,
    problem_solving: f64,
  ) -> Result<Self, WeightsError> {
    let named = [
      ("confidence", confidence),
      ("technical", technical),
      ("communication", communication),
      ("code_quality", code_quality),
      ("problem_solving", problem_solving),
    ];
    for (name, value) in named {
      if !value.is_finite() || value < 0.0 {
        return Err(WeightsError::InvalidWeight { name, value });
      }
    }
    let sum: f64 = named.iter().map(|(_, v)| v).sum();
    if (sum - 1.0).abs() > SUM_TOLERANCE {
      return Err(WeightsError::BadSum { sum });
    }
    Ok(Self { confidence, technical, communication, code_quality, problem_solving })
  }

  /// Weighted sum of the five dimensions, in the order
  /// confidence, technical, communication, code quality, problem solving.
  pub fn apply(&self, dims: [f64; 5]) -> f64 {
    self.confidence * dims[0]
      + self.technical * dims[1]
      + self.communication * dims[2]
      + self.code_quality * dims[3]
      + self.problem_solving * dims[4]
  }

  pub fn sum(&self) -> f64 {
    self.confidence + self.technical + self.communication + self.code_quality + self.problem_solving
  }
}

/// Weight vector entry accepted in TOML configuration.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct WeightsCfg {
  pub confidence: f64,
  pub technical: f64,
  pub communication: f64,
  pub code_quality: f64,
  pub problem_solving: f64,
}

/// Built-in weights plus validated overrides.
#[derive(Clone, Debug, Default)]
pub struct WeightTable {
  overrides: BTreeMap<Domain, DomainWeights>,
}

impl WeightTable {
  /// Validates each configured override; invalid ones are logged and skipped.
  pub fn with_overrides(cfg: &BTreeMap<String, WeightsCfg>) -> Self {
    let mut overrides = BTreeMap::new();
    for (id, w) in cfg {
      let domain = Domain::parse(id);
      if domain.id() != id {
        error!(target: "evaluation", domain = %id, "Skipping weight override for unknown domain");
        continue;
      }
      match DomainWeights::new(w.confidence, w.technical, w.communication, w.code_quality, w.problem_solving) {
        Ok(weights) => {
          info!(target: "evaluation", domain = %domain.id(), "Using configured score weights");
          overrides.insert(domain, weights);
        }
        Err(e) => {
          error!(target: "evaluation", domain = %id, error = %e, "Skipping invalid weight override");
        }
      }
    }
    Self { overrides }
  }

  pub fn weights_for(&self, domain: Domain) -> DomainWeights {
    self.overrides.get(&domain).copied().unwrap_or_else(|| builtin(domain))
  }
}

/// Exhaustive built-in table; domains without a tuned vector use `Default`'s.
fn builtin(domain: Domain) -> DomainWeights {
  let (c, t, m, q, p) = match domain {
    Domain::SoftwareDevelopment => (0.15, 0.30, 0.20, 0.20, 0.15),
    Domain::AiEngineering => (0.15, 0.35, 0.15, 0.10, 0.25),
    Domain::GraphicDesign => (0.20, 0.25, 0.30, 0.05, 0.20),
    Domain::UxDesign => (0.15, 0.20, 0.25, 0.10, 0.30),
    Domain::TeamLeadership => (0.20, 0.25, 0.25, 0.10, 0.20),
    Domain::DataScience
    | Domain::Freelancing
    | Domain::Teaching
    | Domain::ProductManagement
    | Domain::Default => (0.20, 0.25, 0.25, 0.10, 0.20),
  };
  DomainWeights { confidence: c, technical: t, communication: m, code_quality: q, problem_solving: p }
}
