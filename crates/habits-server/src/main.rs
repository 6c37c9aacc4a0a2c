//! habits-server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the SQLite
//! store, optionally connects the Gemini assistant, and serves the JSON API
//! plus the frontend over HTTP.
//!
//! The assistant is enabled by a `[gemini]` table in the config, by
//! `HABITS_GEMINI__API_KEY`, or by a bare `GEMINI_API_KEY` in the environment.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use habits_gemini::{GeminiClient, GeminiConfig};
use habits_server::ServerConfig;
use habits_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Habit tracker server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Drop and recreate the database schema before serving.
  #[arg(long)]
  reset: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let mut server_cfg =
    habits_server::load_config(&cli.config).context("failed to load configuration")?;
  server_cfg.reset_on_start |= cli.reset;

  let store_path = expand_tilde(&server_cfg.store_path);
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  if server_cfg.reset_on_start {
    store.reset().await.context("failed to reset store")?;
  }

  let assistant = build_assistant(&server_cfg)?;
  let app = habits_server::router(Arc::new(store.clone()), assistant, &server_cfg);

  let address = format!("{}:{}", server_cfg.host, server_cfg.port);
  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  store.close().await.context("failed to close store")?;
  tracing::info!("shut down");

  Ok(())
}

fn build_assistant(cfg: &ServerConfig) -> anyhow::Result<Option<Arc<GeminiClient>>> {
  let gemini = cfg.gemini.clone().or_else(|| {
    std::env::var("GEMINI_API_KEY")
      .ok()
      .filter(|key| !key.is_empty())
      .map(GeminiConfig::new)
  });

  match gemini {
    Some(gemini) if !gemini.api_key.is_empty() => {
      tracing::info!(
        text_model = %gemini.text_model,
        image_model = %gemini.image_model,
        "assistant enabled"
      );
      let client = GeminiClient::new(gemini).context("failed to build Gemini client")?;
      Ok(Some(Arc::new(client)))
    }
    _ => {
      tracing::warn!("no Gemini API key configured; /api/ai endpoints will answer 503");
      Ok(None)
    }
  }
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!("failed to listen for ctrl-c: {e}");
  }
  tracing::info!("shutdown requested");
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
