//! Core types and trait definitions for the habit tracker.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! The storage backend, the JSON API, the AI gateway and the CLI all depend
//! on it.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod assistant;
pub mod completion;
pub mod data_uri;
pub mod day;
pub mod error;
pub mod habit;
pub mod store;
pub mod suggestion;

pub use error::{Error, Result};
