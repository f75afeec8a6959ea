//! Answer verification step.
//!
//! `AnswerVerifier` is the seam where a real fact-checking service would plug
//! in. The only implementation shipped is `MockVerifier`, which fabricates a
//! deterministic judgment from answer length and keyword overlap after a
//! simulated network delay. Callers go through `verify_or_fallback`, which
//! never fails: errors and timeouts degrade to a conservative result.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::domain::Domain;
use crate::lexicon::{count_terms, Lexicon};
use crate::util::strip_question_prefix;

/// Correctness judgment for one answer.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Verification {
  pub is_correct: bool,
  /// 0..=100
  pub confidence_score: f64,
  pub verified_facts: Vec<String>,
  pub corrections: Vec<String>,
  pub relevant_sources: Vec<String>,
}

impl Verification {
  /// Result used when verification cannot run.
  pub fn fallback(answer: &str) -> Self {
    Self {
      is_correct: answer.chars().count() > 100,
      confidence_score: 50.0,
      verified_facts: Vec::new(),
      corrections: Vec::new(),
      relevant_sources: Vec::new(),
    }
  }
}

#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
  #[cfg(test)]
  #[error("verification service unavailable: {0}")]
  Unavailable(String),
  #[error("verification timed out after {0:?}")]
  TimedOut(Duration),
}

pub trait AnswerVerifier: Send + Sync {
  fn verify(
    &self,
    question: &str,
    answer: &str,
    domain: Domain,
  ) -> impl Future<Output = Result<Verification, VerificationError>> + Send;
}

/// Deterministic stand-in for an online fact-checking service.
#[derive(Clone, Debug)]
pub struct MockVerifier {
  lexicon: Arc<Lexicon>,
  delay: Duration,
}

impl MockVerifier {
  pub fn new(lexicon: Arc<Lexicon>, delay: Duration) -> Self {
    Self { lexicon, delay }
  }

  fn judge(&self, answer: &str, domain: Domain) -> Verification {
    let length = answer.chars().count();
    let base: u32 = if length < 50 {
      30
    } else if length < 100 {
      50
    } else if length < 200 {
      70
    } else {
      85
    };

    let keyword_hits = count_terms(self.lexicon.verification_keywords(domain), answer) as u32;
    let score = (base + keyword_hits * 5).min(95);
    let is_correct = score > 65;

    let mut verified_facts = Vec::new();
    if length > 30 {
      verified_facts = answer
        .split(|c| matches!(c, '.' | '!' | '?'))
        .map(str::trim)
        .filter(|s| s.chars().count() > 10)
        .take(3)
        .map(str::to_string)
        .collect();
    }

    let mut corrections = Vec::new();
    if !is_correct {
      corrections.push("Consider including specific examples to strengthen your answer.".to_string());
      corrections.push("Your answer could benefit from more technical terminology.".to_string());
      if length < 100 {
        corrections.push("Your answer is too brief for an interview setting.".to_string());
      }
    }

    Verification {
      is_correct,
      confidence_score: f64::from(score),
      verified_facts,
      corrections,
      relevant_sources: vec![
        "Professionals in the field typically reference these concepts in interviews".to_string(),
        "Industry best practices emphasize these points".to_string(),
        "Recent studies support these conclusions".to_string(),
      ],
    }
  }
}

impl AnswerVerifier for MockVerifier {
  async fn verify(
    &self,
    question: &str,
    answer: &str,
    domain: Domain,
  ) -> Result<Verification, VerificationError> {
    let question = strip_question_prefix(question);
    if !self.delay.is_zero() {
      tokio::time::sleep(self.delay).await;
    }
    let verdict = self.judge(answer, domain);
    debug!(target: "evaluation", question_len = question.len(), is_correct = verdict.is_correct, confidence = verdict.confidence_score, "Mock verification done");
    Ok(verdict)
  }
}

/// Runs the verifier under a timeout. Any failure yields `Verification::fallback`.
#[instrument(level = "debug", skip(verifier, question, answer), fields(answer_len = answer.len()))]
pub async fn verify_or_fallback<V: AnswerVerifier>(
  verifier: &V,
  timeout: Duration,
  question: &str,
  answer: &str,
  domain: Domain,
) -> Verification {
  let outcome = match tokio::time::timeout(timeout, verifier.verify(question, answer, domain)).await {
    Ok(result) => result,
    Err(_) => Err(VerificationError::TimedOut(timeout)),
  };
  match outcome {
    Ok(v) => v,
    Err(e) => {
      warn!(target: "evaluation", error = %e, "Answer verification failed; using fallback heuristic");
      Verification::fallback(answer)
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  struct Broken;

  impl AnswerVerifier for Broken {
    async fn verify(&self, _q: &str, _a: &str, _d: Domain) -> Result<Verification, VerificationError> {
      Err(VerificationError::Unavailable("connection refused".into()))
    }
  }

  struct Stalled;

  impl AnswerVerifier for Stalled {
    async fn verify(&self, _q: &str, answer: &str, _d: Domain) -> Result<Verification, VerificationError> {
      tokio::time::sleep(Duration::from_secs(60)).await;
      Ok(Verification::fallback(answer))
    }
  }

  fn mock() -> MockVerifier {
    MockVerifier::new(Arc::new(Lexicon::builtin().unwrap()), Duration::ZERO)
  }

  #[tokio::test]
  async fn short_answer_without_keywords_is_incorrect() {
    let v = mock().verify("Question 1: What is a loop?", "It repeats.", Domain::SoftwareDevelopment).await.unwrap();
    assert_eq!(v.confidence_score, 30.0);
    assert!(!v.is_correct);
    assert_eq!(v.corrections.len(), 3);
    assert!(v.verified_facts.is_empty());
  }

  #[tokio::test]
  async fn keywords_raise_the_score_up_to_the_cap() {
    let answer = format!(
      "{} code programming algorithm function variable class object framework API",
      "x".repeat(200)
    );
    let v = mock().verify("Question 2: Explain OOP", &answer, Domain::SoftwareDevelopment).await.unwrap();
    assert_eq!(v.confidence_score, 95.0);
    assert!(v.is_correct);
    assert!(v.corrections.is_empty());
  }

  #[tokio::test]
  async fn unknown_domain_uses_default_keywords() {
    let answer = "My approach is a repeatable process and a clear strategy for every project.";
    let v = mock().verify("q", answer, Domain::Teaching).await.unwrap();
    // 50 base for 50..100 chars, +5 for approach, process and strategy
    assert_eq!(v.confidence_score, 65.0);
    assert!(!v.is_correct);
  }

  #[tokio::test]
  async fn failing_verifier_falls_back() {
    let long = "a".repeat(150);
    let v = verify_or_fallback(&Broken, Duration::from_secs(1), "q", &long, Domain::Default).await;
    assert!(v.is_correct);
    assert_eq!(v.confidence_score, 50.0);
    let v = verify_or_fallback(&Broken, Duration::from_secs(1), "q", "short", Domain::Default).await;
    assert!(!v.is_correct);
  }

  #[tokio::test(start_paused = true)]
  async fn stalled_verifier_times_out_into_fallback() {
    let v = verify_or_fallback(&Stalled, Duration::from_millis(200), "q", "brief", Domain::Default).await;
    assert_eq!(v, Verification::fallback("brief"));
  }
}
