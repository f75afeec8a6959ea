//! CogniView · Interview Practice Backend
//!
//! - Axum HTTP + WebSocket API
//! - Heuristic answer scoring with a mock verification step
//! - Local JSON key-value store for accounts, history and the recharge timer
//! - Static SPA fallback (./static/index.html)
//!
//! Important env variables:
//!   PORT                   : u16 (default 3000)
//!   COGNIVIEW_CONFIG_PATH  : path to TOML config (scoring, session, weights, extra questions)
//!   COGNIVIEW_STORE_PATH   : JSON store file (default "./data/cogniview_store.json")
//!   LOG_LEVEL              : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT             : "pretty" (default) or "json"

mod analysis;
mod auth;
mod config;
mod cooldown;
mod domain;
mod error;
mod feedback;
mod history;
mod lexicon;
mod logic;
mod progress;
mod protocol;
mod routes;
mod scoring;
mod seeds;
mod session;
mod state;
mod store;
mod telemetry;
mod util;
mod verification;
mod weights;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, instrument};

use crate::routes::build_router;
use crate::state::AppState;

#[instrument(level = "info", skip_all)]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Store, services, question bank and scoring pipeline.
  let state = Arc::new(AppState::from_env()?);

  let app = build_router(state.clone());

  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "cogniview_backend", %addr, "HTTP server listening");
  axum::serve(listener, app).await?;
  Ok(())
}
