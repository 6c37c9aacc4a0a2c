//! `habits`: command-line client for the habit tracker.
//!
//! # Usage
//!
//! ```text
//! habits list
//! habits add "Read" --emoji 📖 --color "#007AFF"
//! habits toggle 1 --proof ./run.jpg
//! habits suggest "sleep better and read more" --add
//! habits --url http://tracker.local:3000 stats
//! ```
//!
//! Dates default to the local calendar day, so "today" is the user's today
//! regardless of the server's time zone.

mod client;
mod proof;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use client::{ApiClient, ApiConfig};
use habits_core::{
  completion::{Toggle, ToggleStatus},
  habit::{HabitId, NewHabit},
};
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "habits", about = "Command-line client for the habit tracker")]
struct Args {
  /// Path to a TOML config file (url, timeout_secs).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the habits server (default: http://localhost:3000).
  #[arg(long, env = "HABITS_URL")]
  url: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Show every habit with its status for a day.
  List {
    /// Day to show (YYYY-MM-DD); defaults to today.
    #[arg(long)]
    date: Option<NaiveDate>,
  },
  /// Create a habit.
  Add {
    name:      String,
    #[arg(long)]
    emoji:     Option<String>,
    #[arg(long)]
    color:     Option<String>,
    #[arg(long)]
    frequency: Option<String>,
  },
  /// Delete a habit and all of its completions.
  Remove { id: HabitId },
  /// Mark a habit done for a day, attach proof, or undo the completion.
  Toggle {
    id:    HabitId,
    #[arg(long)]
    date:  Option<NaiveDate>,
    /// Image file, URL or `data:` URI to attach as proof.
    #[arg(long)]
    proof: Option<String>,
  },
  /// All-time completion counts per habit.
  Stats,
  /// Ask the assistant for habits that serve a goal.
  Suggest {
    goals: String,
    /// Create every suggested habit.
    #[arg(long)]
    add:   bool,
  },
  /// Ask the assistant for a short motivational quote.
  Motivate { habit_name: String },
  /// Edit a proof photo with the assistant, then attach it to a habit.
  EditProof {
    id:     HabitId,
    image:  PathBuf,
    prompt: String,
    #[arg(long)]
    date:   Option<NaiveDate>,
    /// Also write the edited image next to the original.
    #[arg(long)]
    save:   bool,
  },
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url:          String,
  #[serde(default)]
  timeout_secs: Option<u64>,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let api_config = ApiConfig {
    base_url:     args
      .url
      .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
      .unwrap_or_else(|| "http://localhost:3000".to_string()),
    // Image edits can take a while.
    timeout_secs: file_cfg.timeout_secs.unwrap_or(120),
  };

  let client = ApiClient::new(api_config)?;
  run(&client, args.command).await
}

fn local_today() -> NaiveDate { Local::now().date_naive() }

async fn run(client: &ApiClient, command: Command) -> Result<()> {
  match command {
    Command::List { date } => {
      let view = client.today(date.unwrap_or_else(local_today)).await?;
      print!("{}", render::today(&view));
    }
    Command::Add { name, emoji, color, frequency } => {
      if name.trim().is_empty() {
        bail!("habit name must not be empty");
      }
      let habit = NewHabit { name, emoji, color, frequency };
      let id = client.create_habit(&habit).await?;
      println!("created habit {id}");
    }
    Command::Remove { id } => {
      client.delete_habit(id).await?;
      println!("removed habit {id}");
    }
    Command::Toggle { id, date, proof: proof_arg } => {
      let mut toggle = Toggle::new(id, date.unwrap_or_else(local_today));
      if let Some(arg) = proof_arg {
        toggle = toggle.with_proof(proof::resolve(&arg)?);
      }
      toggle_and_report(client, toggle).await?;
    }
    Command::Stats => {
      print!("{}", render::stats(&client.stats().await?));
    }
    Command::Suggest { goals, add } => {
      let suggestions = client.suggest(&goals).await?;
      print!("{}", render::suggestions(&suggestions));
      if add {
        for suggestion in suggestions {
          let name = suggestion.name.clone();
          let id = client.create_habit(&NewHabit::from(suggestion)).await?;
          println!("created habit {id} ({name})");
        }
      }
    }
    Command::Motivate { habit_name } => match client.motivation(&habit_name).await? {
      Some(quote) => println!("{quote}"),
      None => println!("(no quote this time)"),
    },
    Command::EditProof { id, image, prompt, date, save } => {
      let source = proof::load_image(&image)?;
      let Some(edited) = client.edit_proof(&source, &prompt).await? else {
        bail!("the assistant returned no image; nothing attached");
      };
      if save {
        let path = proof::save_edited(&image, &edited)?;
        println!("saved {}", path.display());
      }
      let toggle = Toggle::new(id, date.unwrap_or_else(local_today)).with_proof(edited.to_string());
      toggle_and_report(client, toggle).await?;
    }
  }
  Ok(())
}

/// Send a toggle, print the outcome, and follow a fresh completion with a
/// motivational quote. Quote failures never fail the command.
async fn toggle_and_report(client: &ApiClient, toggle: Toggle) -> Result<()> {
  let id = toggle.habit_id;
  let status = client.toggle(&toggle).await?;
  println!("habit {id}: {status} for {}", toggle.date);

  if status == ToggleStatus::Completed {
    let quote = match client.get_habit(id).await {
      Ok(habit) => client.motivation(&habit.name).await,
      Err(e) => Err(e),
    };
    match quote {
      Ok(Some(quote)) => println!("\n  {quote}"),
      Ok(None) => {}
      Err(e) => tracing::warn!("could not fetch motivation: {e:#}"),
    }
  }
  Ok(())
}
