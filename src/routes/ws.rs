//! WebSocket upgrade + message loop. Each client message is parsed as JSON and
//! forwarded to core logic. We reply with a single JSON message per request.

use std::sync::Arc;

use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use tracing::{debug, error, info, instrument};

use crate::error::ApiError;
use crate::logic::*;
use crate::protocol::{ClientWsMessage, ServerWsMessage};
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "cogniview_backend", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  info!(target: "cogniview_backend", "WebSocket connected");
  while let Some(Ok(msg)) = socket.recv().await {
    match msg {
      Message::Text(txt) => {
        let reply_msg = match serde_json::from_str::<ClientWsMessage>(&txt) {
          Ok(incoming) => {
            debug!(target: "cogniview_backend", kind = incoming.kind(), len = txt.len(), "WS received");
            handle_client_ws(incoming, &state).await
          }
          Err(e) => ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) },
        };

        let out = serde_json::to_string(&reply_msg).unwrap_or_else(|e| {
          serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
        });

        if let Err(e) = socket.send(Message::Text(out)).await {
          error!(target: "cogniview_backend", error = %e, "WS send error");
          break;
        }
      }
      Message::Ping(payload) => {
        let _ = socket.send(Message::Pong(payload)).await;
      }
      Message::Close(_) => break,
      _ => {}
    }
  }
  info!(target: "cogniview_backend", "WebSocket disconnected");
}

impl ClientWsMessage {
  /// Message tag for logs; payloads may hold answers or passwords.
  fn kind(&self) -> &'static str {
    match self {
      ClientWsMessage::Ping => "ping",
      ClientWsMessage::ListDomains => "list_domains",
      ClientWsMessage::Register { .. } => "register",
      ClientWsMessage::Login { .. } => "login",
      ClientWsMessage::Logout => "logout",
      ClientWsMessage::Me => "me",
      ClientWsMessage::SelectDomain { .. } => "select_domain",
      ClientWsMessage::StartSession { .. } => "start_session",
      ClientWsMessage::GetSession => "get_session",
      ClientWsMessage::SubmitAnswer { .. } => "submit_answer",
      ClientWsMessage::NextQuestion => "next_question",
      ClientWsMessage::GetHistory => "get_history",
      ClientWsMessage::ClearHistory => "clear_history",
      ClientWsMessage::GetProgress { .. } => "get_progress",
      ClientWsMessage::GetCooldown => "get_cooldown",
      ClientWsMessage::Evaluate { .. } => "evaluate",
      ClientWsMessage::VoiceTranscript { .. } => "voice_transcript",
    }
  }
}

async fn handle_client_ws(msg: ClientWsMessage, state: &AppState) -> ServerWsMessage {
  dispatch(msg, state).await.unwrap_or_else(|e| ServerWsMessage::Error { message: e.to_string() })
}

async fn dispatch(msg: ClientWsMessage, state: &AppState) -> Result<ServerWsMessage, ApiError> {
  let reply = match msg {
    ClientWsMessage::Ping => ServerWsMessage::Pong,
    ClientWsMessage::ListDomains => ServerWsMessage::Domains { domains: list_domains() },

    ClientWsMessage::Register { name, email, password } => {
      ServerWsMessage::User { user: Some(register(state, &name, &email, &password)?) }
    }
    ClientWsMessage::Login { email, password } => ServerWsMessage::User { user: Some(login(state, &email, &password)?) },
    ClientWsMessage::Logout => {
      logout(state)?;
      ServerWsMessage::LoggedOut
    }
    ClientWsMessage::Me => ServerWsMessage::User { user: current_user(state) },

    ClientWsMessage::SelectDomain { domain } => ServerWsMessage::DomainSelected { domain: select_domain(state, &domain).await },
    ClientWsMessage::StartSession { level } => {
      let session = start_session(state, level.as_deref()).await?;
      info!(target: "session", "WS session started");
      ServerWsMessage::Session { session }
    }
    ClientWsMessage::GetSession => ServerWsMessage::Session { session: session_view(state).await },
    ClientWsMessage::SubmitAnswer { answer } => {
      let result = submit_answer(state, &answer).await?;
      info!(target: "evaluation", overall = result.scores.overall_score, complete = result.complete, "WS answer evaluated");
      ServerWsMessage::AnswerResult { result }
    }
    ClientWsMessage::NextQuestion => {
      let (moved, session) = next_question(state).await?;
      ServerWsMessage::NextQuestion { moved, session }
    }

    ClientWsMessage::GetHistory => ServerWsMessage::History { sessions: history(state) },
    ClientWsMessage::ClearHistory => {
      clear_history(state)?;
      ServerWsMessage::HistoryCleared
    }
    ClientWsMessage::GetProgress { domain } => ServerWsMessage::Progress { progress: progress(state, domain.as_deref()) },
    ClientWsMessage::GetCooldown => ServerWsMessage::Cooldown { remaining_secs: cooldown_remaining(state)? },

    ClientWsMessage::Evaluate { question, answer, domain, level } => ServerWsMessage::Evaluation {
      result: evaluate(state, &question, &answer, &domain, level.as_deref()).await,
    },
    ClientWsMessage::VoiceTranscript { transcript } => ServerWsMessage::Transcript { answer: accept_transcript(&transcript) },
  };
  Ok(reply)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::state::test_support::test_state;

  async fn send(state: &AppState, raw: &str) -> serde_json::Value {
    let msg: ClientWsMessage = serde_json::from_str(raw).unwrap();
    serde_json::to_value(handle_client_ws(msg, state).await).unwrap()
  }

  #[tokio::test]
  async fn ping_and_domains() {
    let state = test_state();
    assert_eq!(send(&state, r#"{"type":"ping"}"#).await["type"], "pong");
    let reply = send(&state, r#"{"type":"list_domains"}"#).await;
    assert_eq!(reply["type"], "domains");
    assert_eq!(reply["domains"][7]["id"], "team-leadership");
  }

  #[tokio::test]
  async fn failures_become_error_replies() {
    let state = test_state();
    let reply = send(&state, r#"{"type":"start_session","level":"expert"}"#).await;
    assert_eq!(reply["type"], "error");
    assert_eq!(reply["message"], "sign in to start an interview session");
  }

  #[tokio::test]
  async fn signed_in_client_can_answer() {
    let state = test_state();
    let reply = send(&state, r#"{"type":"register","name":"Ada","email":"ada@example.com","password":"pw"}"#).await;
    assert_eq!(reply["type"], "user");
    let reply = send(&state, r#"{"type":"start_session"}"#).await;
    assert_eq!(reply["type"], "session");
    assert_eq!(reply["session"]["level"], "beginner");

    let reply = send(&state, r#"{"type":"voice_transcript","transcript":"  A variable names a value.  "}"#).await;
    assert_eq!(reply["answer"], "A variable names a value.");

    let reply = send(&state, r#"{"type":"submit_answer","answer":"A variable names a value."}"#).await;
    assert_eq!(reply["type"], "answer_result");
    assert_eq!(reply["result"]["progress"]["completed"], 1);

    let reply = send(&state, r#"{"type":"get_cooldown"}"#).await;
    assert_eq!(reply["remainingSecs"], serde_json::Value::Null);
  }

  #[test]
  fn unknown_message_type_is_rejected() {
    assert!(serde_json::from_str::<ClientWsMessage>(r#"{"type":"save_settings"}"#).is_err());
  }
}
