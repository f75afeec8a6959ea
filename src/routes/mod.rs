//! Router assembly: HTTP endpoints, WebSocket upgrade, static files, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
  routing::{get, post},
  Router,
};
use tower_http::{
  cors::{Any, CorsLayer},
  services::{ServeDir, ServeFile},
  trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;
pub mod ws;

/// Build the application router with:
/// - WebSocket at `/ws`
/// - JSON API under `/api/v1/...`
/// - Static SPA from `./static` with index fallback
/// - CORS (allow any origin/method/headers)
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
  let static_service = ServeDir::new("./static")
    .append_index_html_on_directories(true)
    .not_found_service(ServeFile::new("./static/index.html"));

  Router::new()
    .route("/ws", get(ws::ws_upgrade))
    .route("/api/v1/health", get(http::http_health))
    .route("/api/v1/domains", get(http::http_domains))
    .route("/api/v1/auth/register", post(http::http_register))
    .route("/api/v1/auth/login", post(http::http_login))
    .route("/api/v1/auth/logout", post(http::http_logout))
    .route("/api/v1/auth/me", get(http::http_me))
    .route("/api/v1/session", get(http::http_get_session))
    .route("/api/v1/session/domain", post(http::http_select_domain))
    .route("/api/v1/session/start", post(http::http_start_session))
    .route("/api/v1/session/answer", post(http::http_submit_answer))
    .route("/api/v1/session/next", post(http::http_next_question))
    .route("/api/v1/history", get(http::http_get_history).delete(http::http_clear_history))
    .route("/api/v1/progress", get(http::http_get_progress))
    .route("/api/v1/cooldown", get(http::http_get_cooldown))
    .route("/api/v1/evaluate", post(http::http_evaluate))
    .with_state(state)
    .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
    .layer(
      TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO)),
    )
    .fallback_service(static_service)
}

#[cfg(test)]
mod tests {
  use axum::body::Body;
  use axum::http::{Method, Request, StatusCode};
  use serde_json::{json, Value};
  use tower::ServiceExt;

  use super::*;
  use crate::state::test_support::test_state;

  fn app() -> Router {
    build_router(Arc::new(test_state()))
  }

  async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
      Some(b) => builder.header("content-type", "application/json").body(Body::from(b.to_string())),
      None => builder.body(Body::empty()),
    }
    .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, value)
  }

  #[tokio::test]
  async fn health_and_domains() {
    let app = app();
    let (status, body) = call(&app, Method::GET, "/api/v1/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);

    let (_, body) = call(&app, Method::GET, "/api/v1/domains", None).await;
    let domains = body.as_array().unwrap();
    assert_eq!(domains.len(), 8);
    assert_eq!(domains[0]["id"], "software-development");
    assert_eq!(domains[0]["name"], "Software Development");
  }

  #[tokio::test]
  async fn session_flow_over_http() {
    let app = app();
    let (status, body) = call(&app, Method::POST, "/api/v1/session/start", Some(json!({}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].as_str().unwrap().contains("sign in"));

    let (status, body) = call(
      &app,
      Method::POST,
      "/api/v1/auth/register",
      Some(json!({ "name": "Ada", "email": "ada@example.com", "password": "pw" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["name"], "Ada");

    let (status, _) = call(
      &app,
      Method::POST,
      "/api/v1/auth/register",
      Some(json!({ "name": "Ada", "email": "ada@example.com", "password": "pw" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, body) = call(&app, Method::POST, "/api/v1/session/domain", Some(json!({ "domain": "teaching" }))).await;
    assert_eq!(body["domain"], "teaching");

    let (status, body) = call(&app, Method::POST, "/api/v1/session/start", Some(json!({ "level": "beginner" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["progress"]["total"], 10);
    assert!(body["currentQuestion"]["question"].as_str().unwrap().starts_with("Question 1: "));

    let (status, body) = call(
      &app,
      Method::POST,
      "/api/v1/session/answer",
      Some(json!({ "answer": "I plan lessons around clear objectives and check understanding often." })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["complete"], false);
    assert_eq!(body["progress"]["completed"], 1);
    assert!(body["scores"]["overallScore"].as_u64().unwrap() <= 100);
    assert!(body["coach"]["text"].as_str().is_some());

    let (_, body) = call(&app, Method::POST, "/api/v1/session/next", None).await;
    assert_eq!(body["moved"], true);
    assert_eq!(body["session"]["currentIndex"], 1);
  }

  #[tokio::test]
  async fn history_progress_and_cooldown_start_empty() {
    let app = app();
    let (_, body) = call(&app, Method::GET, "/api/v1/history", None).await;
    assert_eq!(body["sessions"], json!([]));

    let (_, body) = call(&app, Method::GET, "/api/v1/progress?domain=ux-design", None).await;
    assert_eq!(body["domain"], "ux-design");
    assert_eq!(body["totalSessions"], 0);
    assert_eq!(body["topSkill"], "N/A");

    let (_, body) = call(&app, Method::GET, "/api/v1/cooldown", None).await;
    assert_eq!(body["remainingSecs"], Value::Null);

    let (status, _) = call(&app, Method::DELETE, "/api/v1/history", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
  }

  #[tokio::test]
  async fn answer_without_session_conflicts() {
    let app = app();
    let (status, body) = call(&app, Method::POST, "/api/v1/session/answer", Some(json!({ "answer": "hello" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "no interview session is active");
  }

  #[tokio::test]
  async fn stateless_evaluate() {
    let app = app();
    let (status, body) = call(
      &app,
      Method::POST,
      "/api/v1/evaluate",
      Some(json!({ "question": "What is a loop?", "answer": "idk", "domain": "software-development" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["scores"]["overallScore"], 10);
    assert_eq!(body["coach"]["tier"], "dont_know");
  }
}
