//! JSON REST API for the habit tracker.
//!
//! Exposes an axum [`Router`] backed by any [`habits_core::store::HabitStore`]
//! and, optionally, any [`habits_core::assistant::Assistant`]. TLS, static
//! assets and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", habits_api::api_router(store.clone(), assistant.clone()))
//! ```

pub mod assistant;
pub mod completions;
pub mod error;
pub mod extract;
pub mod habits;
pub mod stats;

use std::sync::Arc;

use axum::{
  Router,
  routing::{any, get, post},
};
use habits_core::{assistant::Assistant, store::HabitStore};

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// When `assistant` is `None` every `/ai/*` request answers 503. The returned
/// `Router<()>` can be nested into any parent router regardless of its own
/// state type.
pub fn api_router<S, A>(store: Arc<S>, assistant: Option<Arc<A>>) -> Router<()>
where
  S: HabitStore + 'static,
  A: Assistant + 'static,
{
  habit_router(store).merge(assistant_router(assistant))
}

fn habit_router<S>(store: Arc<S>) -> Router<()>
where
  S: HabitStore + 'static,
{
  Router::new()
    // Habits
    .route("/habits", get(habits::list::<S>).post(habits::create::<S>))
    .route("/habits/today", get(habits::today::<S>))
    .route(
      "/habits/{id}",
      get(habits::get_one::<S>).delete(habits::delete_one::<S>),
    )
    // Completions
    .route("/complete", post(completions::toggle::<S>))
    // Stats
    .route("/stats", get(stats::handler::<S>))
    .with_state(store)
}

fn assistant_router<A>(assistant: Option<Arc<A>>) -> Router<()>
where
  A: Assistant + 'static,
{
  match assistant {
    Some(assistant) => Router::new()
      .route("/ai/suggestions", post(assistant::suggest::<A>))
      .route("/ai/motivation", post(assistant::motivation::<A>))
      .route("/ai/proof-edits", post(assistant::edit_proof::<A>))
      .with_state(assistant),
    None => Router::new().route("/ai/{*rest}", any(assistant::unavailable)),
  }
}

#[cfg(test)]
mod tests;
