//! Length and tone analysis of a raw answer. Pure functions, no side effects.

use serde::Serialize;

use crate::lexicon::Lexicon;

/// Answers shorter than this many characters are "too short".
pub const MIN_APPROPRIATE_CHARS: usize = 50;
/// Answers longer than this many characters are "too long".
pub const MAX_APPROPRIATE_CHARS: usize = 1000;

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LengthAssessment {
  TooShort,
  TooLong,
  Appropriate,
}

impl LengthAssessment {
  pub fn feedback(self) -> &'static str {
    match self {
      LengthAssessment::TooShort => "Your answer is too brief for an interview. Aim for 2-3 minutes of speaking time with specific examples.",
      LengthAssessment::TooLong => "Your answer is quite lengthy. In interviews, aim for concise responses (2-3 minutes) to respect the interviewer's time.",
      LengthAssessment::Appropriate => "Your answer length is appropriate for an interview setting.",
    }
  }
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct LengthAnalysis {
  pub assessment: LengthAssessment,
  pub feedback: &'static str,
}

/// Buckets the trimmed answer length.
pub fn analyze_length(answer: &str) -> LengthAnalysis {
  let len = answer.trim().chars().count();
  let assessment = if len < MIN_APPROPRIATE_CHARS {
    LengthAssessment::TooShort
  } else if len > MAX_APPROPRIATE_CHARS {
    LengthAssessment::TooLong
  } else {
    LengthAssessment::Appropriate
  };
  LengthAnalysis { assessment, feedback: assessment.feedback() }
}

/// Counts of confident vs. uncertain phrasing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ToneMarkers {
  pub confident: usize,
  pub uncertain: usize,
}

pub fn analyze_tone(lexicon: &Lexicon, answer: &str) -> ToneMarkers {
  ToneMarkers {
    confident: lexicon.confident_markers(answer),
    uncertain: lexicon.uncertain_markers(answer),
  }
}

/// Sentence structure used by the communication score.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SentenceStats {
  pub sentences: usize,
  pub well_formed: usize,
}

impl SentenceStats {
  pub fn ratio(&self) -> f64 {
    if self.sentences == 0 { 0.0 } else { self.well_formed as f64 / self.sentences as f64 }
  }
}

/// Splits on `.`, `!` and `?`. A sentence is well formed when it starts with a
/// character that is its own uppercase form and is longer than five characters.
pub fn sentence_stats(answer: &str) -> SentenceStats {
  let mut stats = SentenceStats::default();
  for raw in answer.split(|c| matches!(c, '.' | '!' | '?')) {
    let s = raw.trim();
    if s.is_empty() { continue; }
    stats.sentences += 1;
    let starts_upper = s
      .chars()
      .next()
      .map(|c| c.to_uppercase().eq(std::iter::once(c)))
      .unwrap_or(false);
    if starts_upper && s.chars().count() > 5 {
      stats.well_formed += 1;
    }
  }
  stats
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn buckets_by_trimmed_length() {
    assert_eq!(analyze_length("   short   ").assessment, LengthAssessment::TooShort);
    assert_eq!(analyze_length(&"a".repeat(50)).assessment, LengthAssessment::Appropriate);
    assert_eq!(analyze_length(&"a".repeat(1000)).assessment, LengthAssessment::Appropriate);
    let long = analyze_length(&"a".repeat(1200));
    assert_eq!(long.assessment, LengthAssessment::TooLong);
    assert!(long.feedback.contains("quite lengthy"));
  }

  #[test]
  fn sentence_stats_counts_well_formed_sentences() {
    let stats = sentence_stats("First sentence here. second one is lower. Ok. 42 is a number!");
    assert_eq!(stats.sentences, 4);
    // "Ok" is too short, "second..." is lowercase, digits count as upper-stable.
    assert_eq!(stats.well_formed, 2);
    assert_eq!(sentence_stats("...").sentences, 0);
    assert_eq!(sentence_stats("").ratio(), 0.0);
  }
}
