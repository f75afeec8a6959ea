//! Core behaviors shared by both HTTP and WebSocket handlers.
//!
//! This includes:
//!   - Account actions and the domain picker
//!   - Starting a session (sign-in and recharge checks first)
//!   - Scoring an answer, coaching it and recording it; completing the session
//!   - Navigation, history, progress and the recharge countdown
//!   - Stateless evaluation and voice transcript acceptance

use chrono::Utc;
use tracing::{debug, error, info, instrument, warn};

use crate::auth::User;
use crate::domain::{AnswerScores, Domain, Level, SELECTABLE_DOMAINS};
use crate::error::ApiError;
use crate::feedback::{coach_response, CoachResponse};
use crate::progress::{domain_progress, domains_with_history, most_recent_domain};
use crate::protocol::{AnswerOut, DomainOut, EvaluateOut, ProgressOut, SessionView};
use crate::session::{SessionError, SessionManager};
use crate::state::AppState;
use crate::store::StoreError;
use crate::util::trunc_for_log;

pub fn list_domains() -> Vec<DomainOut> {
  SELECTABLE_DOMAINS.iter().copied().map(DomainOut::from).collect()
}

pub fn register(state: &AppState, name: &str, email: &str, password: &str) -> Result<User, ApiError> {
  Ok(state.auth.register(name, email, password)?)
}

pub fn login(state: &AppState, email: &str, password: &str) -> Result<User, ApiError> {
  Ok(state.auth.login(email, password)?)
}

pub fn logout(state: &AppState) -> Result<(), ApiError> {
  Ok(state.auth.logout()?)
}

pub fn current_user(state: &AppState) -> Option<User> {
  state.auth.current_user()
}

#[instrument(level = "info", skip(state))]
pub async fn select_domain(state: &AppState, domain: &str) -> Domain {
  let requested = Domain::parse(domain);
  let selected = state.manager.lock().await.change_domain(requested);
  if selected != requested {
    warn!(target: "session", %domain, selected = %selected.id(), "Domain not offered; using default");
  }
  selected
}

#[instrument(level = "info", skip(state))]
pub async fn start_session(state: &AppState, level: Option<&str>) -> Result<SessionView, ApiError> {
  if !state.auth.is_authenticated() {
    return Err(SessionError::NotAuthenticated.into());
  }
  state.cooldown.ensure_ready(Utc::now())?;

  let level = level.map(Level::parse).unwrap_or_default();
  let mut manager = state.manager.lock().await;
  {
    let mut rng = rand::thread_rng();
    manager.start_new_session(&state.bank, level, &mut rng);
  }
  Ok(view(&manager))
}

pub async fn session_view(state: &AppState) -> SessionView {
  view(&*state.manager.lock().await)
}

/// Scores, coaches and records the answer to the current question.
///
/// The manager stays locked while the answer is scored so a second answer
/// cannot land on the same question mid-evaluation. A scoring failure records
/// neutral scores and replies with the apology text.
#[instrument(level = "info", skip(state, answer), fields(answer_len = answer.len()))]
pub async fn submit_answer(state: &AppState, answer: &str) -> Result<AnswerOut, ApiError> {
  let answer = answer.trim();
  if answer.is_empty() {
    return Err(ApiError::BadRequest("answer must not be empty".into()));
  }

  let mut manager = state.manager.lock().await;
  if manager.is_complete() {
    return Err(SessionError::SessionComplete.into());
  }
  let question = manager.current_question().cloned().ok_or(SessionError::NoActiveSession)?;
  let (domain, level) = (manager.domain(), manager.level());
  debug!(
    target: "evaluation",
    question_id = %question.id,
    question = %trunc_for_log(&question.question, 80),
    "Scoring answer"
  );

  let (scores, coach) = evaluate_inner(state, &question.question, answer, domain, level).await;
  let completed = manager.record_answer(answer, scores)?;
  let progress = manager.progress();

  let mut feedback = None;
  if let Some(session) = completed {
    if let Err(e) = state.history.append(&session) {
      error!(target: "store", id = %session.id, error = %e, "Failed to save completed session");
    }
    if let Err(e) = state.cooldown.start(Utc::now()) {
      error!(target: "store", error = %e, "Failed to start recharge period");
    }
    feedback = session.feedback;
  }

  info!(
    target: "evaluation",
    question_id = %question.id,
    overall = scores.overall_score,
    complete = manager.is_complete(),
    "Answer recorded"
  );
  Ok(AnswerOut { scores, coach, complete: manager.is_complete(), progress, feedback })
}

pub async fn next_question(state: &AppState) -> Result<(bool, SessionView), ApiError> {
  let mut manager = state.manager.lock().await;
  if manager.session().is_none() {
    return Err(SessionError::NoActiveSession.into());
  }
  let moved = manager.go_to_next_question();
  Ok((moved, view(&manager)))
}

pub fn history(state: &AppState) -> Vec<crate::domain::Session> {
  state.history.load()
}

pub fn clear_history(state: &AppState) -> Result<(), ApiError> {
  state.history.clear()?;
  info!(target: "store", "Session history cleared");
  Ok(())
}

/// Stats for the requested domain, else the most recently practiced one.
pub fn progress(state: &AppState, domain: Option<&str>) -> ProgressOut {
  let sessions = state.history.load();
  let domain = domain
    .map(Domain::parse)
    .or_else(|| most_recent_domain(&sessions))
    .unwrap_or_default();
  ProgressOut { stats: domain_progress(&sessions, domain), domains: domains_with_history(&sessions) }
}

pub fn cooldown_remaining(state: &AppState) -> Result<Option<u64>, StoreError> {
  state.cooldown.remaining_secs(Utc::now())
}

/// Scores an answer without touching the session.
#[instrument(level = "info", skip(state, question, answer), fields(answer_len = answer.len()))]
pub async fn evaluate(state: &AppState, question: &str, answer: &str, domain: &str, level: Option<&str>) -> EvaluateOut {
  let level = level.map(Level::parse).unwrap_or_default();
  let (scores, coach) = evaluate_inner(state, question, answer, Domain::parse(domain), level).await;
  EvaluateOut { scores, coach }
}

/// A finished speech transcript becomes the draft answer; silence is ignored.
pub fn accept_transcript(transcript: &str) -> Option<String> {
  let text = transcript.trim();
  (!text.is_empty()).then(|| text.to_string())
}

async fn evaluate_inner(
  state: &AppState,
  question: &str,
  answer: &str,
  domain: Domain,
  level: Level,
) -> (AnswerScores, CoachResponse) {
  match state.synthesizer.score(question, answer, domain).await {
    Ok(scores) => {
      let mut rng = rand::thread_rng();
      let coach = coach_response(state.synthesizer.lexicon(), answer, &scores, domain, question, level, &mut rng);
      (scores, coach)
    }
    Err(e) => {
      error!(target: "evaluation", domain = %domain.id(), error = %e, "Evaluation failed; using neutral scores");
      (AnswerScores::neutral_fallback(), CoachResponse::apology())
    }
  }
}

fn view(manager: &SessionManager) -> SessionView {
  let session = manager.session().cloned();
  let complete = manager.is_complete();
  SessionView {
    domain: manager.domain(),
    level: manager.level(),
    current_index: manager.current_index(),
    complete,
    current_question: manager.current_question().cloned(),
    progress: manager.progress(),
    verdict: session.as_ref().and_then(|s| s.feedback.as_ref()).filter(|_| complete).map(|f| f.verdict()),
    duration_secs: session.as_ref().and_then(|s| s.duration_secs()),
    session,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::AppConfig;
  use crate::session::QUESTIONS_PER_SESSION;
  use crate::state::test_support::{test_state, test_state_with};

  const GOOD_ANSWER: &str = "I would design the system with a clear architecture, measure latency, and write tests for every function. First I analyze the requirements, then I implement and optimize step by step.";

  #[tokio::test]
  async fn starting_requires_sign_in() {
    let state = test_state();
    let err = start_session(&state, None).await.unwrap_err();
    assert!(matches!(err, ApiError::Session(SessionError::NotAuthenticated)));
  }

  #[tokio::test]
  async fn full_session_is_saved_to_history() {
    let state = test_state();
    register(&state, "Ada", "ada@example.com", "pw").unwrap();
    assert_eq!(select_domain(&state, "ux-design").await, Domain::UxDesign);

    let view = start_session(&state, Some("expert")).await.unwrap();
    assert_eq!(view.level, Level::Expert);
    assert_eq!(view.progress.unwrap().total, QUESTIONS_PER_SESSION);

    for i in 0..QUESTIONS_PER_SESSION {
      let out = submit_answer(&state, GOOD_ANSWER).await.unwrap();
      assert_eq!(out.complete, i + 1 == QUESTIONS_PER_SESSION);
      let (moved, _) = next_question(&state).await.unwrap();
      assert_eq!(moved, i + 1 < QUESTIONS_PER_SESSION);
    }

    let sessions = history(&state);
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].answers.len(), QUESTIONS_PER_SESSION);
    assert!(sessions[0].feedback.is_some());

    let view = session_view(&state).await;
    assert!(view.complete);
    assert!(view.verdict.is_some());
    let err = submit_answer(&state, GOOD_ANSWER).await.unwrap_err();
    assert!(matches!(err, ApiError::Session(SessionError::SessionComplete)));

    let progress = progress(&state, None);
    assert_eq!(progress.stats.domain, Domain::UxDesign);
    assert_eq!(progress.stats.total_sessions, 1);
  }

  #[tokio::test]
  async fn completion_starts_the_recharge_period() {
    let mut config = AppConfig::default();
    config.scoring.verification_delay_ms = 0;
    let state = test_state_with(config);
    register(&state, "Ada", "ada@example.com", "pw").unwrap();
    start_session(&state, None).await.unwrap();
    for _ in 0..QUESTIONS_PER_SESSION {
      submit_answer(&state, "I don't know").await.unwrap();
      next_question(&state).await.unwrap();
    }
    let remaining = cooldown_remaining(&state).unwrap().unwrap();
    assert!(remaining > 170 && remaining <= 180);
    let err = start_session(&state, None).await.unwrap_err();
    assert!(matches!(err, ApiError::Session(SessionError::Recharging { .. })));
  }

  #[tokio::test]
  async fn answering_without_a_session_fails() {
    let state = test_state();
    let err = submit_answer(&state, "an answer").await.unwrap_err();
    assert!(matches!(err, ApiError::Session(SessionError::NoActiveSession)));
    assert!(matches!(submit_answer(&state, "   ").await, Err(ApiError::BadRequest(_))));
  }

  #[tokio::test]
  async fn dont_know_answer_gets_minimal_scores() {
    let state = test_state();
    let out = evaluate(&state, "Question 1: What is a variable?", "I have no idea", "software-development", None).await;
    assert_eq!(out.scores, AnswerScores::dont_know());
    assert_eq!(out.coach.tier, Some(crate::feedback::ResponseTier::DontKnow));
    assert!(out.coach.text.contains("named storage location"));
  }

  #[tokio::test]
  async fn unknown_domain_falls_back_on_selection() {
    let state = test_state();
    assert_eq!(select_domain(&state, "astronomy").await, Domain::SoftwareDevelopment);
  }

  #[test]
  fn transcripts_are_trimmed_and_blank_ones_ignored() {
    assert_eq!(accept_transcript("  hello there \n"), Some("hello there".into()));
    assert_eq!(accept_transcript("   "), None);
  }
}
