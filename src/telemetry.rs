//! Telemetry initialization (tracing/tracing-subscriber).
//!
//! Behavior:
//! - LOG_LEVEL controls the filter (e.g. "debug" or detailed directives). The
//!   default is "info,evaluation=debug,session=debug,cogniview_backend=debug,tower_http=info,axum=info".
//! - LOG_FORMAT selects "pretty" (default) or "json" structured logs.
//!
//! Targets used across the crate: `cogniview_backend`, `evaluation`,
//! `session`, `store`, `auth`.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,evaluation=debug,session=debug,cogniview_backend=debug,tower_http=info,axum=info";

pub fn init_tracing() {
  let filter = EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

  let builder = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_target(true)
    .with_file(true)
    .with_line_number(true);

  // The two formatters are different types, so init inside each arm.
  match std::env::var("LOG_FORMAT").as_deref() {
    Ok("json") => builder.json().init(),
    _ => builder.init(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn module_doc_names_the_default_filter() {
    let src = include_str!("telemetry.rs");
    assert!(src.contains(&format!("default is \"{DEFAULT_FILTER}\"")));
    assert!(DEFAULT_FILTER.parse::<EnvFilter>().is_ok());
  }
}
