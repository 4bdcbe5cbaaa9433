//! Math Challenge · word problem backend
//!
//! - Axum HTTP API: `/api/problem`, `/api/check_answer`, `/api/health`
//! - Optional OpenAI generation with fallback to built-in problems
//! - Static SPA fallback (STATIC_DIR/index.html)
//!
//! Important env variables (also read from `.env`):
//!   PORT                : u16 (default 8000)
//!   OPENAI_API_KEY      : enables OpenAI generation if present
//!   OPENAI_BASE_URL     : default "https://api.openai.com/v1"
//!   OPENAI_MODEL        : default "gpt-4o"
//!   OPENAI_TIMEOUT_SECS : default 20
//!   PROBLEM_CONFIG_PATH : path to TOML config (prompts, temperature, extra fallback problems)
//!   STATIC_DIR          : SPA bundle directory, default "./static"
//!   FRONTEND_URL        : restricts CORS to this origin (+ http://localhost:3000)
//!   LOG_LEVEL           : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT          : "pretty" (default) or "json"

mod config;
mod domain;
mod error;
mod generator;
mod logic;
mod openai;
mod protocol;
mod routes;
mod seeds;
mod state;
mod store;
mod telemetry;
mod util;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::ServerSettings;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  let dotenv = dotenvy::dotenv();
  telemetry::init_tracing();
  if let Err(e) = &dotenv {
    if !e.not_found() {
      warn!(target: "math_challenge_backend", error = %e, "Failed to load .env");
    }
  }

  let settings = ServerSettings::from_env();

  // Shared state: problem generator (OpenAI + fallbacks) and the problem store.
  let state = Arc::new(AppState::from_env());
  let app = build_router(state, &settings);

  let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
  let listener = TcpListener::bind(addr).await?;
  info!(target: "math_challenge_backend", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    warn!(target: "math_challenge_backend", error = %e, "Failed to listen for ctrl-c");
    std::future::pending::<()>().await;
  }
  info!(target: "math_challenge_backend", "Shutdown signal received");
}
