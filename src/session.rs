//! Interview session state machine and the question bank it draws from.
//!
//! States: no session, in progress (index 0..=9), complete. The manager is
//! plain data; callers hold it behind a lock and persist completed sessions.

use std::collections::HashMap;

use chrono::Utc;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::domain::{AnswerScores, Domain, Level, Question, RecordedAnswer, Session, SessionFeedback};
use crate::seeds::{additional_questions, custom_questions, seed_questions};

pub const QUESTIONS_PER_SESSION: usize = 10;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
  #[error("no interview session is active")]
  NoActiveSession,
  #[error("the interview session is already complete")]
  SessionComplete,
  #[error("recharging: next session available in {remaining_secs}s")]
  Recharging { remaining_secs: u64 },
  #[error("sign in to start an interview session")]
  NotAuthenticated,
}

/// Questions indexed by (domain, level).
#[derive(Clone, Debug, Default)]
pub struct QuestionBank {
  by_key: HashMap<(Domain, Level), Vec<Question>>,
}

impl QuestionBank {
  pub fn builtin() -> Self {
    let mut bank = Self::default();
    bank.extend(seed_questions());
    bank
  }

  /// Adds questions; entries without a difficulty are filed as beginner.
  pub fn extend(&mut self, questions: impl IntoIterator<Item = Question>) {
    for q in questions {
      let level = q.difficulty.unwrap_or_default();
      self.by_key.entry((q.domain, level)).or_default().push(q);
    }
  }

  pub fn get(&self, domain: Domain, level: Level) -> Option<&[Question]> {
    self.by_key.get(&(domain, level)).map(Vec::as_slice).filter(|qs| !qs.is_empty())
  }

  pub fn len(&self) -> usize {
    self.by_key.values().map(Vec::len).sum()
  }

  /// Ten shuffled questions, prefixed `Question i: `.
  ///
  /// Falls back to the domain's beginner set, then to generated questions,
  /// and tops up with generic filler when fewer than ten are available.
  pub fn draw<R: Rng + ?Sized>(&self, domain: Domain, level: Level, rng: &mut R) -> Vec<Question> {
    let mut questions = match self.get(domain, level).or_else(|| self.get(domain, Level::Beginner)) {
      Some(qs) => qs.to_vec(),
      None => {
        warn!(target: "session", domain = %domain.id(), "No questions for domain; generating custom questions");
        custom_questions(domain)
      }
    };

    if questions.len() < QUESTIONS_PER_SESSION {
      let needed = QUESTIONS_PER_SESSION - questions.len();
      warn!(target: "session", domain = %domain.id(), level = level.as_str(), needed, "Topping up with additional questions");
      questions.extend(additional_questions(domain, level).into_iter().take(needed));
    }

    questions.shuffle(rng);
    questions.truncate(QUESTIONS_PER_SESSION);
    for (i, q) in questions.iter_mut().enumerate() {
      q.question = format!("Question {}: {}", i + 1, q.question);
    }
    questions
  }
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct Progress {
  pub total: usize,
  pub completed: usize,
}

/// Single-user interview state.
#[derive(Debug, Default)]
pub struct SessionManager {
  domain: Domain,
  level: Level,
  session: Option<Session>,
  current_index: usize,
  complete: bool,
}

impl SessionManager {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn domain(&self) -> Domain { self.domain }
  pub fn level(&self) -> Level { self.level }
  pub fn session(&self) -> Option<&Session> { self.session.as_ref() }
  pub fn current_index(&self) -> usize { self.current_index }
  pub fn is_complete(&self) -> bool { self.complete }

  pub fn current_question(&self) -> Option<&Question> {
    self.session.as_ref().and_then(|s| s.questions.get(self.current_index))
  }

  pub fn progress(&self) -> Option<Progress> {
    self.session.as_ref().map(|s| Progress { total: s.questions.len(), completed: s.answers.len() })
  }

  /// Selects a domain. Anything outside the picker selects software development.
  /// A session drawn for another domain is discarded.
  pub fn change_domain(&mut self, domain: Domain) -> Domain {
    let domain = if domain.is_selectable() { domain } else { Domain::SoftwareDevelopment };
    self.domain = domain;
    if self.session.as_ref().is_some_and(|s| s.domain != domain) {
      info!(target: "session", domain = %domain.id(), "Domain changed; dropping active session");
      self.reset();
    }
    domain
  }

  #[instrument(level = "info", skip(self, bank, rng), fields(domain = %self.domain.id()))]
  pub fn start_new_session<R: Rng + ?Sized>(&mut self, bank: &QuestionBank, level: Level, rng: &mut R) -> &Session {
    self.level = level;
    let session = Session {
      id: format!("session-{}", Uuid::new_v4()),
      domain: self.domain,
      difficulty_level: level,
      start_time: Utc::now(),
      end_time: None,
      questions: bank.draw(self.domain, level, rng),
      answers: Default::default(),
      feedback: None,
    };
    info!(target: "session", id = %session.id, questions = session.questions.len(), "Session started");
    self.current_index = 0;
    self.complete = false;
    self.session.insert(session)
  }

  /// Stores the answer for the current question. On the last question the
  /// session is stamped, summarized and returned so the caller can persist it.
  pub fn record_answer(&mut self, text: &str, scores: AnswerScores) -> Result<Option<Session>, SessionError> {
    let session = self.session.as_mut().ok_or(SessionError::NoActiveSession)?;
    if self.complete {
      return Err(SessionError::SessionComplete);
    }
    let question = session.questions.get(self.current_index).ok_or(SessionError::SessionComplete)?;
    session
      .answers
      .insert(question.id.clone(), RecordedAnswer { text: text.to_string(), scores });

    if self.current_index + 1 < session.questions.len() {
      return Ok(None);
    }

    session.end_time = Some(Utc::now());
    session.feedback = aggregate_feedback(session);
    self.complete = true;
    info!(
      target: "session",
      id = %session.id,
      overall = session.feedback.as_ref().map(|f| f.overall_score),
      "Session complete"
    );
    Ok(Some(session.clone()))
  }

  /// Moves to the next question; false when already on the last one.
  pub fn go_to_next_question(&mut self) -> bool {
    match &self.session {
      Some(s) if self.current_index + 1 < s.questions.len() => {
        self.current_index += 1;
        true
      }
      _ => false,
    }
  }

  fn reset(&mut self) {
    self.session = None;
    self.current_index = 0;
    self.complete = false;
  }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
  let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
  if n == 0 { 0.0 } else { sum / n as f64 }
}

fn uses_code_quality(domain: Domain) -> bool {
  matches!(domain, Domain::SoftwareDevelopment | Domain::AiEngineering | Domain::ProductManagement)
}

/// Session summary from the recorded answers. `None` when nothing was answered.
pub fn aggregate_feedback(session: &Session) -> Option<SessionFeedback> {
  let scores: Vec<&AnswerScores> = session.answers.values().map(|a| &a.scores).collect();
  if scores.is_empty() {
    return None;
  }
  let avg = |f: fn(&AnswerScores) -> u8| mean(scores.iter().map(|s| f64::from(f(s))));
  let averages = DimensionAverages {
    confidence: avg(|s| s.confidence_score),
    technical: avg(|s| s.technical_score),
    communication: avg(|s| s.communication_score),
    code_quality: avg(|s| s.code_quality_score),
    problem_solving: avg(|s| s.problem_solving_score),
  };
  let domain = session.domain;
  let round = |v: f64| v.round() as u8;

  let mut fb = SessionFeedback {
    confidence_score: round(averages.confidence),
    problem_solving_score: round(averages.problem_solving),
    strengths: strengths(&averages, domain),
    improvements: improvements(&averages, domain),
    ..Default::default()
  };
  if domain != Domain::GraphicDesign {
    fb.technical_score = Some(round(averages.technical));
    fb.communication_score = Some(round(averages.communication));
  }
  if uses_code_quality(domain) {
    fb.code_quality_score = Some(round(averages.code_quality));
  }
  if domain == Domain::TeamLeadership {
    fb.management_score = Some(round(mean(scores.iter().map(|s| f64::from(s.management_score.unwrap_or(0))))));
  }

  let mut relevant = vec![fb.confidence_score, fb.problem_solving_score];
  relevant.extend(fb.technical_score);
  relevant.extend(fb.communication_score);
  relevant.extend(fb.code_quality_score);
  relevant.extend(fb.management_score.filter(|m| *m > 0));
  fb.overall_score = round(mean(relevant.into_iter().map(f64::from)));
  Some(fb)
}

/// Unrounded per-dimension means.
struct DimensionAverages {
  confidence: f64,
  technical: f64,
  communication: f64,
  code_quality: f64,
  problem_solving: f64,
}

const MAX_SUMMARY_ITEMS: usize = 3;

fn strengths(a: &DimensionAverages, domain: Domain) -> Vec<String> {
  let tiers = [
    (a.confidence, "Strong confidence in responses", "Good confidence level overall"),
    (a.technical, "Excellent technical knowledge", "Solid technical understanding"),
    (a.communication, "Clear and effective communication", "Good communication skills"),
    (a.code_quality, "Excellent code quality awareness", "Good understanding of code quality principles"),
    (a.problem_solving, "Outstanding problem-solving approach", "Effective problem-solving skills"),
  ];
  let mut out: Vec<&str> = Vec::new();
  for (avg, high, good) in tiers {
    if avg > 80.0 {
      out.push(high);
    } else if avg > 70.0 {
      out.push(good);
    }
  }
  out.extend(domain_strengths(domain));
  out.into_iter().take(MAX_SUMMARY_ITEMS).map(String::from).collect()
}

fn improvements(a: &DimensionAverages, domain: Domain) -> Vec<String> {
  let checks = [
    (a.confidence, "Build more confidence in your answers"),
    (a.technical, "Deepen technical knowledge in key areas"),
    (a.communication, "Work on clearer communication of concepts"),
    (a.code_quality, "Focus on code quality principles"),
    (a.problem_solving, "Strengthen problem-solving approach"),
  ];
  let mut out: Vec<&str> = checks.iter().filter(|(avg, _)| *avg < 65.0).map(|(_, text)| *text).collect();
  out.extend(domain_improvements(domain));
  out.into_iter().take(MAX_SUMMARY_ITEMS).map(String::from).collect()
}

fn domain_strengths(domain: Domain) -> &'static [&'static str] {
  match domain {
    Domain::SoftwareDevelopment => &["Technical problem-solving ability", "Understanding of programming concepts"],
    Domain::AiEngineering => &["Machine learning concepts", "Model evaluation knowledge"],
    Domain::GraphicDesign => &["Creative process description", "Visual design understanding"],
    Domain::Freelancing => &["Client management approach", "Business acumen"],
    Domain::Teaching => &["Student-centric approach", "Educational methodology"],
    Domain::ProductManagement => &["User-focused perspective", "Feature prioritization skills"],
    Domain::TeamLeadership => &["People management ability", "Team motivation techniques"],
    Domain::UxDesign | Domain::DataScience | Domain::Default => &[],
  }
}

fn domain_improvements(domain: Domain) -> &'static [&'static str] {
  match domain {
    Domain::SoftwareDevelopment => &["Practice explaining complex algorithms", "Discuss code complexity and trade-offs"],
    Domain::AiEngineering => &["Go deeper on implementation details", "Discuss model evaluation metrics"],
    Domain::GraphicDesign => &["Articulate design decisions more clearly", "Discuss client collaboration process"],
    Domain::Freelancing => &["Provide specific pricing strategies", "Explain contract management process"],
    Domain::Teaching => &["Describe assessment methodology", "Explain technology integration in teaching"],
    Domain::ProductManagement => &["Elaborate on user research methods", "Discuss metrics for feature success"],
    Domain::TeamLeadership => &["Provide specific examples of delegation", "Describe methods for handling underperformers"],
    Domain::UxDesign | Domain::DataScience | Domain::Default => &[],
  }
}
