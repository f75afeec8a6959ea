//! Domain models used by the backend: career domains, difficulty levels,
//! questions, per-answer scores and the interview session itself.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Career track selecting question banks, lexicons and scoring weights.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum Domain {
  SoftwareDevelopment,
  AiEngineering,
  GraphicDesign,
  UxDesign,
  DataScience,
  Freelancing,
  Teaching,
  ProductManagement,
  TeamLeadership,
  #[serde(other)]
  Default,
}

impl Default for Domain {
  fn default() -> Self { Domain::SoftwareDevelopment }
}

/// Domains offered in the picker, in display order.
pub const SELECTABLE_DOMAINS: [Domain; 8] = [
  Domain::SoftwareDevelopment,
  Domain::AiEngineering,
  Domain::GraphicDesign,
  Domain::UxDesign,
  Domain::Freelancing,
  Domain::Teaching,
  Domain::ProductManagement,
  Domain::TeamLeadership,
];

impl Domain {
  /// Lenient parse: unknown ids map to `Default`.
  pub fn parse(s: &str) -> Self {
    match s.trim().to_ascii_lowercase().as_str() {
      "software-development" => Domain::SoftwareDevelopment,
      "ai-engineering" => Domain::AiEngineering,
      "graphic-design" => Domain::GraphicDesign,
      "ux-design" => Domain::UxDesign,
      "data-science" => Domain::DataScience,
      "freelancing" => Domain::Freelancing,
      "teaching" => Domain::Teaching,
      "product-management" => Domain::ProductManagement,
      "team-leadership" => Domain::TeamLeadership,
      _ => Domain::Default,
    }
  }

  pub fn id(self) -> &'static str {
    match self {
      Domain::SoftwareDevelopment => "software-development",
      Domain::AiEngineering => "ai-engineering",
      Domain::GraphicDesign => "graphic-design",
      Domain::UxDesign => "ux-design",
      Domain::DataScience => "data-science",
      Domain::Freelancing => "freelancing",
      Domain::Teaching => "teaching",
      Domain::ProductManagement => "product-management",
      Domain::TeamLeadership => "team-leadership",
      Domain::Default => "default",
    }
  }

  /// Human readable name, e.g. "Software Development".
  pub fn label(self) -> String {
    self
      .id()
      .split('-')
      .map(|word| {
        let mut chars = word.chars();
        match chars.next() {
          Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
          None => String::new(),
        }
      })
      .collect::<Vec<_>>()
      .join(" ")
  }

  /// Lowercase words, e.g. "software development". Used in generated prompts.
  pub fn words(self) -> String {
    self.id().replace('-', " ")
  }

  pub fn is_selectable(self) -> bool {
    SELECTABLE_DOMAINS.contains(&self)
  }

  pub fn description(self) -> &'static str {
    match self {
      Domain::SoftwareDevelopment => "Technical interviews for software engineering roles",
      Domain::AiEngineering => "Specialized interviews for AI and machine learning positions",
      Domain::GraphicDesign => "Portfolio reviews and design thinking interviews",
      Domain::UxDesign => "User experience design and usability testing interviews",
      Domain::Freelancing => "Client acquisition and project management questions",
      Domain::Teaching => "Educational technology and teaching methodology interviews",
      Domain::ProductManagement => "Product strategy and roadmap discussions",
      Domain::TeamLeadership => "Leadership, delegation and team culture interviews",
      Domain::DataScience => "Data analysis, statistics and modeling interviews",
      Domain::Default => "General career interview questions",
    }
  }
}

/// Interview difficulty.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Level {
  Beginner,
  Intermediate,
  Expert,
}

impl Default for Level {
  fn default() -> Self { Level::Beginner }
}

impl Level {
  /// Lenient parse used for free-text inputs; anything unknown is `Beginner`.
  pub fn parse(s: &str) -> Self {
    match s.trim().to_ascii_lowercase().as_str() {
      "intermediate" => Level::Intermediate,
      "expert" => Level::Expert,
      _ => Level::Beginner,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Level::Beginner => "beginner",
      Level::Intermediate => "intermediate",
      Level::Expert => "expert",
    }
  }
}

/// One interview prompt. Immutable once drawn into a session.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Question {
  pub id: String,
  pub domain: Domain,
  pub question: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub category: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub difficulty: Option<Level>,
}

/// Scores for a single answer, each in 0..=100.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AnswerScores {
  pub confidence_score: u8,
  pub technical_score: u8,
  pub communication_score: u8,
  pub code_quality_score: u8,
  pub problem_solving_score: u8,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub management_score: Option<u8>,
  pub overall_score: u8,
}

impl AnswerScores {
  /// Minimal scores given to "I don't know" style answers.
  pub fn dont_know() -> Self {
    Self {
      confidence_score: 0,
      technical_score: 0,
      communication_score: 20,
      code_quality_score: 0,
      problem_solving_score: 0,
      management_score: Some(0),
      overall_score: 10,
    }
  }

  /// Neutral scores used when the evaluation pipeline itself fails.
  pub fn neutral_fallback() -> Self {
    Self {
      confidence_score: 50,
      technical_score: 50,
      communication_score: 50,
      code_quality_score: 50,
      problem_solving_score: 50,
      management_score: None,
      overall_score: 50,
    }
  }
}

/// Answer text plus the scores it earned.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RecordedAnswer {
  pub text: String,
  pub scores: AnswerScores,
}

/// Session-level aggregate produced when the last answer is recorded.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SessionFeedback {
  pub confidence_score: u8,
  pub problem_solving_score: u8,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub technical_score: Option<u8>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub communication_score: Option<u8>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub code_quality_score: Option<u8>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub management_score: Option<u8>,
  pub overall_score: u8,
  #[serde(default)]
  pub strengths: Vec<String>,
  #[serde(default)]
  pub improvements: Vec<String>,
}

impl SessionFeedback {
  /// One-line summary by overall band.
  pub fn verdict(&self) -> &'static str {
    if self.overall_score >= 80 {
      "Excellent work! You're demonstrating strong interview skills."
    } else if self.overall_score >= 60 {
      "Good progress. Some areas need refinement to stand out more."
    } else {
      "Keep practicing. Focus on the highlighted improvement areas."
    }
  }
}

/// One complete practice run of exactly ten questions.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
  pub id: String,
  pub domain: Domain,
  pub difficulty_level: Level,
  pub start_time: DateTime<Utc>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub end_time: Option<DateTime<Utc>>,
  pub questions: Vec<Question>,
  #[serde(default)]
  pub answers: BTreeMap<String, RecordedAnswer>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub feedback: Option<SessionFeedback>,
}

impl Session {
  /// Complete iff the last question has an answer.
  pub fn is_complete(&self) -> bool {
    self
      .questions
      .last()
      .map(|q| self.answers.contains_key(&q.id))
      .unwrap_or(false)
  }

  /// Wall-clock length of a finished session.
  pub fn duration_secs(&self) -> Option<i64> {
    self.end_time.map(|end| (end - self.start_time).num_seconds())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn domain_parse_is_lenient() {
    assert_eq!(Domain::parse("UX-Design"), Domain::UxDesign);
    assert_eq!(Domain::parse("astronaut"), Domain::Default);
  }

  #[test]
  fn unknown_domain_deserializes_to_default() {
    let d: Domain = serde_json::from_str("\"underwater-basket-weaving\"").unwrap();
    assert_eq!(d, Domain::Default);
    let d: Domain = serde_json::from_str("\"team-leadership\"").unwrap();
    assert_eq!(d, Domain::TeamLeadership);
  }

  #[test]
  fn labels_are_title_cased() {
    assert_eq!(Domain::SoftwareDevelopment.label(), "Software Development");
    assert_eq!(Domain::UxDesign.words(), "ux design");
  }

  #[test]
  fn scores_use_camel_case_on_the_wire() {
    let json = serde_json::to_value(AnswerScores::dont_know()).unwrap();
    assert_eq!(json["overallScore"], 10);
    assert_eq!(json["communicationScore"], 20);
    assert_eq!(json["managementScore"], 0);
    let fallback = serde_json::to_value(AnswerScores::neutral_fallback()).unwrap();
    assert!(fallback.get("managementScore").is_none());
  }
}
