//! Score synthesis: turns one answer into the six-number `AnswerScores`.
//!
//! Pipeline, in order:
//!   - "don't know" short-circuit (no verification call)
//!   - length bucket and tone markers
//!   - one verification call (falls back on failure, never errors)
//!   - question relevance, domain keywords, misconceptions
//!   - code-quality and problem-solving indicators
//!   - sentence structure
//!   - clamp, then weighted overall
//!
//! Dimensions are kept as `f64` until the very end so that the weighted
//! overall is computed from the clamped, unrounded values.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, instrument};

use crate::analysis::{analyze_length, analyze_tone, sentence_stats, LengthAssessment};
use crate::domain::{AnswerScores, Domain};
use crate::lexicon::{count_terms, Lexicon};
use crate::util::strip_question_prefix;
use crate::verification::{verify_or_fallback, AnswerVerifier, Verification};
use crate::weights::WeightTable;

const BASELINE: f64 = 60.0;
const OVERALL_ADJUSTMENT: f64 = 5.0;
const RELEVANCE_PER_MATCH: f64 = 6.0;
const RELEVANCE_CAP: f64 = 30.0;
const MISCONCEPTION_PENALTY: f64 = 15.0;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum EvaluationError {
  #[error("{0} score is not a finite number")]
  NonFiniteScore(&'static str),
}

/// Working values for the five weighted dimensions.
#[derive(Clone, Copy, Debug)]
struct Dims {
  confidence: f64,
  technical: f64,
  communication: f64,
  code_quality: f64,
  problem_solving: f64,
}

pub struct ScoreSynthesizer<V> {
  lexicon: Arc<Lexicon>,
  weights: WeightTable,
  verifier: V,
  verification_timeout: Duration,
}

impl<V: AnswerVerifier> ScoreSynthesizer<V> {
  pub fn new(lexicon: Arc<Lexicon>, weights: WeightTable, verifier: V, verification_timeout: Duration) -> Self {
    Self { lexicon, weights, verifier, verification_timeout }
  }

  pub fn lexicon(&self) -> &Lexicon {
    &self.lexicon
  }

  /// Scores one answer. Awaits the verifier at most once.
  #[instrument(level = "info", skip(self, question, answer), fields(answer_len = answer.len()))]
  pub async fn score(&self, question: &str, answer: &str, domain: Domain) -> Result<AnswerScores, EvaluationError> {
    if self.lexicon.is_dont_know(answer) {
      debug!(target: "evaluation", "Non-answer detected; minimal scores");
      return Ok(AnswerScores::dont_know());
    }
    let verification = verify_or_fallback(&self.verifier, self.verification_timeout, question, answer, domain).await;
    let scores = self.synthesize(question, answer, domain, &verification)?;
    debug!(
      target: "evaluation",
      overall = scores.overall_score,
      technical = scores.technical_score,
      is_correct = verification.is_correct,
      "Answer scored"
    );
    Ok(scores)
  }

  /// Everything after verification. Pure given the verification result.
  fn synthesize(
    &self,
    question: &str,
    answer: &str,
    domain: Domain,
    verification: &Verification,
  ) -> Result<AnswerScores, EvaluationError> {
    let lx = &*self.lexicon;
    let trimmed_len = answer.trim().chars().count();
    let mut d = Dims {
      confidence: BASELINE,
      technical: BASELINE,
      communication: BASELINE,
      code_quality: BASELINE,
      problem_solving: BASELINE,
    };

    match analyze_length(answer).assessment {
      LengthAssessment::TooShort => {
        d.confidence = (d.confidence - 20.0).max(30.0);
        d.communication = (d.communication - 15.0).max(30.0);
      }
      LengthAssessment::TooLong => {
        d.communication = (d.communication - 10.0).max(40.0);
      }
      LengthAssessment::Appropriate => {
        d.confidence += 5.0;
        d.communication += 5.0;
      }
    }

    let tone = analyze_tone(lx, answer);
    d.confidence += 7.0 * tone.confident as f64;
    d.confidence -= 4.0 * tone.uncertain as f64;

    d.technical = if verification.is_correct {
      (d.technical + 15.0).min(100.0)
    } else {
      (d.technical - 10.0).max(30.0)
    };
    d.technical = 0.7 * d.technical + 0.3 * verification.confidence_score;

    if trimmed_len < 20 {
      d.confidence = (d.confidence - 30.0).max(30.0);
    } else if trimmed_len > 100 {
      d.confidence = (d.confidence + 25.0).min(95.0);
    }

    d.technical += self.question_relevance(question, answer);

    let keywords = count_terms(lx.technical_keywords(domain), answer);
    let misconceptions = count_terms(lx.misconceptions(domain), answer);
    d.technical += match keywords {
      k if k > 5 => 45.0,
      k if k > 3 => 35.0,
      k if k > 1 => 25.0,
      _ => 0.0,
    };
    d.technical -= MISCONCEPTION_PENALTY * misconceptions as f64;
    d.technical = clamp_score("technical", d.technical)?;
    if trimmed_len < 40 && keywords > 3 {
      d.technical -= 5.0;
    }

    let code_quality = count_terms(lx.code_quality_indicators(), answer);
    if code_quality > 3 {
      d.code_quality = (d.code_quality + 40.0).min(100.0);
    } else if code_quality > 1 {
      d.code_quality = (d.code_quality + 25.0).min(100.0);
    } else if code_quality == 0 && domain == Domain::SoftwareDevelopment {
      d.code_quality = (d.code_quality - 10.0).max(40.0);
    }

    let problem_solving = count_terms(lx.problem_solving_indicators(), answer);
    d.problem_solving = if problem_solving > 3 {
      (d.problem_solving + 40.0).min(100.0)
    } else if problem_solving > 1 {
      (d.problem_solving + 25.0).min(100.0)
    } else {
      (d.problem_solving - 5.0).max(40.0)
    };

    let stats = sentence_stats(answer);
    let ratio = stats.ratio();
    if stats.sentences > 4 && ratio > 0.7 {
      d.communication = (d.communication + 35.0).min(100.0);
    } else if stats.sentences > 2 && ratio > 0.5 {
      d.communication = (d.communication + 20.0).min(100.0);
    } else if stats.sentences == 0 || ratio < 0.3 {
      d.communication = (d.communication - 15.0).max(30.0);
    }
    if trimmed_len < 25 {
      d.communication = (d.communication - 20.0).max(30.0);
    } else if trimmed_len > 1000 {
      d.communication = (d.communication - 10.0).max(40.0);
    }

    let d = Dims {
      confidence: clamp_score("confidence", d.confidence)?,
      technical: clamp_score("technical", d.technical)?,
      communication: clamp_score("communication", d.communication)?,
      code_quality: clamp_score("code quality", d.code_quality)?,
      problem_solving: clamp_score("problem solving", d.problem_solving)?,
    };

    let weighted = self.weights.weights_for(domain).apply([
      d.confidence,
      d.technical,
      d.communication,
      d.code_quality,
      d.problem_solving,
    ]);
    let overall = clamp_score("overall", (OVERALL_ADJUSTMENT + weighted).floor())?;

    Ok(AnswerScores {
      confidence_score: to_u8(d.confidence),
      technical_score: to_u8(d.technical),
      communication_score: to_u8(d.communication),
      code_quality_score: to_u8(d.code_quality),
      problem_solving_score: to_u8(d.problem_solving),
      management_score: None,
      overall_score: to_u8(overall),
    })
  }

  /// +6 per meaningful question word found in the answer, capped at 30.
  fn question_relevance(&self, question: &str, answer: &str) -> f64 {
    let answer = answer.to_lowercase();
    let matches = strip_question_prefix(question)
      .to_lowercase()
      .split_whitespace()
      .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
      .filter(|w| w.chars().count() > 4 && !self.lexicon.is_question_stopword(w))
      .filter(|w| answer.contains(*w))
      .count();
    (RELEVANCE_PER_MATCH * matches as f64).min(RELEVANCE_CAP)
  }
}

fn clamp_score(name: &'static str, value: f64) -> Result<f64, EvaluationError> {
  if !value.is_finite() {
    return Err(EvaluationError::NonFiniteScore(name));
  }
  Ok(value.clamp(0.0, 100.0))
}

// Callers clamp first, so the cast never saturates.
fn to_u8(value: f64) -> u8 {
  value.round() as u8
}

#[cfg(test)]
mod tests {
  use std::sync::atomic::{AtomicUsize, Ordering};

  use super::*;
  use crate::verification::VerificationError;

  struct Fixed {
    is_correct: bool,
    confidence: f64,
    calls: AtomicUsize,
  }

  impl Fixed {
    fn new(is_correct: bool, confidence: f64) -> Self {
      Self { is_correct, confidence, calls: AtomicUsize::new(0) }
    }
  }

  impl AnswerVerifier for Fixed {
    async fn verify(&self, _q: &str, _a: &str, _d: Domain) -> Result<Verification, VerificationError> {
      self.calls.fetch_add(1, Ordering::SeqCst);
      Ok(Verification {
        is_correct: self.is_correct,
        confidence_score: self.confidence,
        verified_facts: vec![],
        corrections: vec![],
        relevant_sources: vec![],
      })
    }
  }

  fn synth(verifier: Fixed) -> ScoreSynthesizer<Fixed> {
    let lexicon = Arc::new(Lexicon::builtin().unwrap());
    ScoreSynthesizer::new(lexicon, WeightTable::default(), verifier, Duration::from_secs(1))
  }

  fn all_in_range(s: &AnswerScores) -> bool {
    [
      s.confidence_score,
      s.technical_score,
      s.communication_score,
      s.code_quality_score,
      s.problem_solving_score,
      s.overall_score,
    ]
    .iter()
    .all(|v| *v <= 100)
  }

  #[tokio::test]
  async fn dont_know_short_circuits_without_verification() {
    let s = synth(Fixed::new(true, 90.0));
    let scores = s.score("Question 1: What is a variable?", "I don't know", Domain::SoftwareDevelopment).await.unwrap();
    assert_eq!(scores, AnswerScores::dont_know());
    assert_eq!(scores.overall_score, 10);
    assert_eq!(s.verifier.calls.load(Ordering::SeqCst), 0);
  }

  #[tokio::test]
  async fn short_answer_walks_the_pipeline() {
    let s = synth(Fixed::new(false, 30.0));
    let scores = s.score("Question 1: What is a variable?", "It stores data.", Domain::SoftwareDevelopment).await.unwrap();
    // too short: c 40, m 45; incorrect: t 50 -> 0.7*50 + 0.3*30 = 44;
    // under 20 chars: c 30; no indicators: q 50, p 55; under 25 chars: m 30.
    assert_eq!(scores.confidence_score, 30);
    assert_eq!(scores.technical_score, 44);
    assert_eq!(scores.communication_score, 30);
    assert_eq!(scores.code_quality_score, 50);
    assert_eq!(scores.problem_solving_score, 55);
    assert_eq!(scores.management_score, None);
    // 5 + .15*30 + .30*44 + .20*30 + .20*50 + .15*55 = 46.95
    assert_eq!(scores.overall_score, 46);
    assert_eq!(s.verifier.calls.load(Ordering::SeqCst), 1);
  }

  #[tokio::test]
  async fn confidence_is_clamped_before_weighting() {
    let s = synth(Fixed::new(false, 30.0));
    let answer = "Definitely, certainly, absolutely, without a doubt, I'm confident, I'm certain, I know, clearly.";
    let scores = s.score("Tell me about yourself", answer, Domain::Teaching).await.unwrap();
    // 65 + 8 * 7 = 121 before the clamp
    assert_eq!(scores.confidence_score, 100);
    assert!(all_in_range(&scores));
  }

  #[tokio::test]
  async fn keyword_rich_answer_caps_technical() {
    let s = synth(Fixed::new(true, 95.0));
    let answer = "I write clean code and refactor often. Every function and class gets unit test coverage. \
                  The algorithm choice depends on complexity and the data structure. \
                  We use a framework, an API layer and a database with version control. \
                  My approach is to identify the root cause, analyze tradeoffs and optimize.";
    let scores = s.score("Question 4: How do you structure a codebase?", answer, Domain::SoftwareDevelopment).await.unwrap();
    assert_eq!(scores.technical_score, 100);
    assert_eq!(scores.code_quality_score, 100);
    assert_eq!(scores.problem_solving_score, 100);
    // 65 for an appropriate length, +25 for more than 100 chars
    assert_eq!(scores.confidence_score, 90);
    assert!(scores.overall_score >= 90);
    assert!(all_in_range(&scores));
  }

  #[tokio::test]
  async fn very_long_answer_keeps_communication_floor() {
    let s = synth(Fixed::new(false, 50.0));
    let answer = "Abcdefghij. ".repeat(100);
    let scores = s.score("q", &answer, Domain::SoftwareDevelopment).await.unwrap();
    // too long: m 50; 100 well-formed sentences: 85; over 1000 chars: 75
    assert_eq!(scores.communication_score, 75);
    assert!(all_in_range(&scores));
  }

  #[tokio::test]
  async fn scoring_is_repeatable() {
    let s = synth(Fixed::new(true, 70.0));
    let answer = "A variable is a named slot in memory. Maybe I think it holds a value of some type.";
    let a = s.score("Question 2: What is a variable?", answer, Domain::AiEngineering).await.unwrap();
    let b = s.score("Question 2: What is a variable?", answer, Domain::AiEngineering).await.unwrap();
    assert_eq!(a, b);
  }

  #[tokio::test]
  async fn question_words_raise_technical_score() {
    let s = synth(Fixed::new(false, 30.0));
    let with = s
      .score("Question 3: Describe recursion and iteration.", "Recursion calls itself, iteration loops.", Domain::Teaching)
      .await
      .unwrap();
    let without = s
      .score("Question 3: Describe recursion and iteration.", "Something calls itself, others loop.", Domain::Teaching)
      .await
      .unwrap();
    assert!(with.technical_score > without.technical_score);
  }

  #[tokio::test]
  async fn non_finite_verification_is_an_error() {
    let s = synth(Fixed::new(true, f64::NAN));
    let err = s.score("q", "A reasonably sized answer about things.", Domain::Default).await.unwrap_err();
    assert_eq!(err, EvaluationError::NonFiniteScore("technical"));
  }
}
