//! Transport-level error: maps service errors to HTTP status plus
//! `{ "error": "<message>" }`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use crate::auth::AuthError;
use crate::session::SessionError;
use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
  #[error("{0}")]
  BadRequest(String),
  #[error(transparent)]
  Auth(#[from] AuthError),
  #[error(transparent)]
  Session(#[from] SessionError),
  #[error(transparent)]
  Store(#[from] StoreError),
}

impl ApiError {
  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::Auth(AuthError::MissingFields) => StatusCode::BAD_REQUEST,
      ApiError::Auth(AuthError::EmailTaken) => StatusCode::CONFLICT,
      ApiError::Auth(AuthError::InvalidCredentials) => StatusCode::UNAUTHORIZED,
      ApiError::Auth(AuthError::Store(_)) | ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
      ApiError::Session(SessionError::NotAuthenticated) => StatusCode::UNAUTHORIZED,
      ApiError::Session(SessionError::Recharging { .. }) => StatusCode::TOO_MANY_REQUESTS,
      ApiError::Session(SessionError::NoActiveSession | SessionError::SessionComplete) => StatusCode::CONFLICT,
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    if status.is_server_error() {
      error!(target: "cogniview_backend", error = %self, "Request failed");
    }
    let body = Json(json!({ "error": self.to_string() }));
    (status, body).into_response()
  }
}
