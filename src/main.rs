//! Story40 · Daily Writing Challenge Backend
//!
//! - Axum HTTP API under /api/v1
//! - JSON-file persistence for the submission aggregate
//! - Free Dictionary API integration (inflected-form lookup)
//! - Static SPA fallback (./static/index.html)
//!
//! Important env variables:
//!   PORT          : u16 (default 3000)
//!   DATA_PATH     : path to the aggregate JSON file (default "./data/story40.json")
//!   DICTIONARY_BASE_URL  : default "https://freedictionaryapi.com/api/v1"
//!   FEEDBACK_WEBHOOK_URL : enables the feedback relay if present
//!   APP_CONFIG_PATH : path to TOML config (custom word bank + placeholder title)
//!   LOG_LEVEL     : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT    : "pretty" (default) or "json"

mod telemetry;
mod util;
mod domain;
mod config;
mod catalog;
mod dictionary;
mod matching;
mod streak;
mod store;
mod feedback;
mod state;
mod protocol;
mod errors;
mod logic;
mod routes;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, instrument};

use crate::routes::build_router;
use crate::state::AppState;

#[instrument(level = "info", skip_all)]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Build shared application state (word catalog, store, dictionary client, notifier).
  let state = Arc::new(AppState::new());

  // Build the HTTP router with routes, CORS and tracing layers.
  let app = build_router(state.clone());

  // Read port from env or default to 3000.
  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "story40_backend", %addr, "HTTP server listening");
  axum::serve(listener, app).await?;
  Ok(())
}
