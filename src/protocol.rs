//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::auth::User;
use crate::domain::{AnswerScores, Domain, Level, Question, Session, SessionFeedback};
use crate::feedback::CoachResponse;
use crate::progress::DomainProgress;
use crate::session::Progress;

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
  Ping,
  ListDomains,
  Register {
    name: String,
    email: String,
    password: String,
  },
  Login {
    email: String,
    password: String,
  },
  Logout,
  Me,
  SelectDomain {
    domain: String,
  },
  StartSession {
    #[serde(default)]
    level: Option<String>,
  },
  GetSession,
  SubmitAnswer {
    answer: String,
  },
  NextQuestion,
  GetHistory,
  ClearHistory,
  GetProgress {
    #[serde(default)]
    domain: Option<String>,
  },
  GetCooldown,
  Evaluate {
    question: String,
    answer: String,
    domain: String,
    #[serde(default)]
    level: Option<String>,
  },
  VoiceTranscript {
    transcript: String,
  },
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
  Pong,
  Domains {
    domains: Vec<DomainOut>,
  },
  User {
    user: Option<User>,
  },
  LoggedOut,
  DomainSelected {
    domain: Domain,
  },
  Session {
    session: SessionView,
  },
  AnswerResult {
    result: AnswerOut,
  },
  NextQuestion {
    moved: bool,
    session: SessionView,
  },
  History {
    sessions: Vec<Session>,
  },
  HistoryCleared,
  Progress {
    progress: ProgressOut,
  },
  Cooldown {
    #[serde(rename = "remainingSecs")]
    remaining_secs: Option<u64>,
  },
  Evaluation {
    result: EvaluateOut,
  },
  Transcript {
    answer: Option<String>,
  },
  Error {
    message: String,
  },
}

/// One entry of the domain picker.
#[derive(Clone, Debug, Serialize)]
pub struct DomainOut {
  pub id: Domain,
  pub name: String,
  pub description: &'static str,
}

impl From<Domain> for DomainOut {
  fn from(d: Domain) -> Self {
    Self { id: d, name: d.label(), description: d.description() }
  }
}

/// Snapshot of the interview state, shared by HTTP and WS.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
  pub domain: Domain,
  pub level: Level,
  pub current_index: usize,
  pub complete: bool,
  pub current_question: Option<Question>,
  pub progress: Option<Progress>,
  pub session: Option<Session>,
  /// Summary line once the session is complete.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub verdict: Option<&'static str>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub duration_secs: Option<i64>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOut {
  pub scores: AnswerScores,
  pub coach: CoachResponse,
  pub complete: bool,
  pub progress: Option<Progress>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub feedback: Option<SessionFeedback>,
}

#[derive(Clone, Debug, Serialize)]
pub struct EvaluateOut {
  pub scores: AnswerScores,
  pub coach: CoachResponse,
}

#[derive(Clone, Debug, Serialize)]
pub struct ProgressOut {
  #[serde(flatten)]
  pub stats: DomainProgress,
  /// Domains with at least one stored session.
  pub domains: Vec<Domain>,
}

//
// HTTP request/response DTOs
//

#[derive(Debug, Deserialize)]
pub struct RegisterIn {
  pub name: String,
  pub email: String,
  pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginIn {
  pub email: String,
  pub password: String,
}

#[derive(Serialize)]
pub struct UserOut {
  pub user: Option<User>,
}

#[derive(Debug, Deserialize)]
pub struct SelectDomainIn {
  pub domain: String,
}
#[derive(Serialize)]
pub struct SelectDomainOut {
  pub domain: Domain,
}

#[derive(Debug, Deserialize, Default)]
pub struct StartSessionIn {
  #[serde(default)]
  pub level: Option<String>,
}

#[derive(Deserialize)]
pub struct AnswerIn {
  pub answer: String,
}

#[derive(Serialize)]
pub struct NextOut {
  pub moved: bool,
  pub session: SessionView,
}

#[derive(Serialize)]
pub struct HistoryOut {
  pub sessions: Vec<Session>,
}

#[derive(Debug, Deserialize)]
pub struct ProgressQuery {
  pub domain: Option<String>,
}

#[derive(Serialize)]
pub struct CooldownOut {
  #[serde(rename = "remainingSecs")]
  pub remaining_secs: Option<u64>,
}

#[derive(Deserialize)]
pub struct EvaluateIn {
  pub question: String,
  pub answer: String,
  pub domain: String,
  #[serde(default)]
  pub level: Option<String>,
}

#[derive(Serialize)]
pub struct HealthOut {
  pub ok: bool,
}
