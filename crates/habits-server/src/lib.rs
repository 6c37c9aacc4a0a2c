//! HTTP server for the habit tracker.
//!
//! Mounts the JSON API under `/api`, optionally serves the single-page
//! frontend from a static directory, and wires in request tracing and the
//! request-body limit.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::{Router, extract::DefaultBodyLimit};
use habits_core::{assistant::Assistant, store::HabitStore};
use habits_gemini::GeminiConfig;
use serde::Deserialize;
use tower_http::{
  services::{ServeDir, ServeFile},
  trace::TraceLayer,
};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Environment variables with this prefix override file settings, e.g.
/// `HABITS_PORT=8080` or `HABITS_GEMINI__API_KEY=...`.
pub const ENV_PREFIX: &str = "HABITS";

/// Runtime server configuration, deserialised from `config.toml` and the
/// environment.
#[derive(Deserialize, Clone, Debug)]
pub struct ServerConfig {
  pub host:             String,
  pub port:             u16,
  pub store_path:       PathBuf,
  /// Drop and recreate the schema at startup, discarding all data.
  pub reset_on_start:   bool,
  /// Directory holding the built frontend; `index.html` answers unknown paths.
  pub static_dir:       Option<PathBuf>,
  /// Largest accepted request body. Proof images travel inline as data URIs.
  pub body_limit_bytes: usize,
  /// Assistant settings; without them the `/ai` endpoints answer 503.
  pub gemini:           Option<GeminiConfig>,
}

/// Layer defaults, the optional config file and the environment, in that
/// order of increasing precedence.
pub fn load_config(path: &Path) -> Result<ServerConfig, config::ConfigError> {
  config::Config::builder()
    .set_default("host", "0.0.0.0")?
    .set_default("port", 3000)?
    .set_default("store_path", "habits.db")?
    .set_default("reset_on_start", false)?
    .set_default("body_limit_bytes", 10 * 1024 * 1024)?
    .add_source(config::File::from(path).required(false))
    .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
    .build()?
    .try_deserialize()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router.
pub fn router<S, A>(
  store: Arc<S>,
  assistant: Option<Arc<A>>,
  config: &ServerConfig,
) -> Router
where
  S: HabitStore + 'static,
  A: Assistant + 'static,
{
  let mut app = Router::new().nest("/api", habits_api::api_router(store, assistant));

  if let Some(dir) = &config.static_dir {
    let spa = ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")));
    app = app.fallback_service(spa);
  }

  app
    .layer(DefaultBodyLimit::max(config.body_limit_bytes))
    .layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────
