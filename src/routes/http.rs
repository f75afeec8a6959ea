//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented; answers and passwords are never logged.

use std::sync::Arc;

use axum::{
  extract::{Query, State},
  http::StatusCode,
  response::IntoResponse,
  Json,
};
use tracing::{info, instrument};

use crate::error::ApiError;
use crate::logic::*;
use crate::protocol::*;
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse {
  Json(HealthOut { ok: true })
}

pub async fn http_domains() -> impl IntoResponse {
  Json(list_domains())
}

#[instrument(level = "info", skip(state, body))]
pub async fn http_register(
  State(state): State<Arc<AppState>>,
  Json(body): Json<RegisterIn>,
) -> Result<Json<UserOut>, ApiError> {
  let user = register(&state, &body.name, &body.email, &body.password)?;
  Ok(Json(UserOut { user: Some(user) }))
}

#[instrument(level = "info", skip(state, body))]
pub async fn http_login(
  State(state): State<Arc<AppState>>,
  Json(body): Json<LoginIn>,
) -> Result<Json<UserOut>, ApiError> {
  let user = login(&state, &body.email, &body.password)?;
  Ok(Json(UserOut { user: Some(user) }))
}

#[instrument(level = "info", skip(state))]
pub async fn http_logout(State(state): State<Arc<AppState>>) -> Result<StatusCode, ApiError> {
  logout(&state)?;
  Ok(StatusCode::NO_CONTENT)
}

pub async fn http_me(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(UserOut { user: current_user(&state) })
}

pub async fn http_get_session(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(session_view(&state).await)
}

#[instrument(level = "info", skip(state), fields(domain = %body.domain))]
pub async fn http_select_domain(
  State(state): State<Arc<AppState>>,
  Json(body): Json<SelectDomainIn>,
) -> impl IntoResponse {
  let domain = select_domain(&state, &body.domain).await;
  Json(SelectDomainOut { domain })
}

#[instrument(level = "info", skip(state, body))]
pub async fn http_start_session(
  State(state): State<Arc<AppState>>,
  body: Option<Json<StartSessionIn>>,
) -> Result<Json<SessionView>, ApiError> {
  let body = body.map(|Json(b)| b).unwrap_or_default();
  let view = start_session(&state, body.level.as_deref()).await?;
  info!(
    target: "session",
    id = view.session.as_ref().map(|s| s.id.as_str()).unwrap_or_default(),
    "HTTP session started"
  );
  Ok(Json(view))
}

#[instrument(level = "info", skip(state, body), fields(answer_len = body.answer.len()))]
pub async fn http_submit_answer(
  State(state): State<Arc<AppState>>,
  Json(body): Json<AnswerIn>,
) -> Result<Json<AnswerOut>, ApiError> {
  let out = submit_answer(&state, &body.answer).await?;
  info!(target: "evaluation", overall = out.scores.overall_score, complete = out.complete, "HTTP answer evaluated");
  Ok(Json(out))
}

#[instrument(level = "info", skip(state))]
pub async fn http_next_question(State(state): State<Arc<AppState>>) -> Result<Json<NextOut>, ApiError> {
  let (moved, session) = next_question(&state).await?;
  Ok(Json(NextOut { moved, session }))
}

pub async fn http_get_history(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(HistoryOut { sessions: history(&state) })
}

#[instrument(level = "info", skip(state))]
pub async fn http_clear_history(State(state): State<Arc<AppState>>) -> Result<StatusCode, ApiError> {
  clear_history(&state)?;
  Ok(StatusCode::NO_CONTENT)
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_progress(
  State(state): State<Arc<AppState>>,
  Query(q): Query<ProgressQuery>,
) -> impl IntoResponse {
  Json(progress(&state, q.domain.as_deref()))
}

pub async fn http_get_cooldown(State(state): State<Arc<AppState>>) -> Result<Json<CooldownOut>, ApiError> {
  let remaining_secs = cooldown_remaining(&state)?;
  Ok(Json(CooldownOut { remaining_secs }))
}

#[instrument(level = "info", skip(state, body), fields(domain = %body.domain, answer_len = body.answer.len()))]
pub async fn http_evaluate(
  State(state): State<Arc<AppState>>,
  Json(body): Json<EvaluateIn>,
) -> impl IntoResponse {
  Json(evaluate(&state, &body.question, &body.answer, &body.domain, body.level.as_deref()).await)
}
