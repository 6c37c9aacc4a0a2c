//! Gemini-backed [`Assistant`](habits_core::assistant::Assistant).
//!
//! A thin client for the `generateContent` REST endpoint. Requests are sent
//! once; there is no retry, batching or caching.

mod client;
mod prompt;
mod wire;

pub mod error;

pub use client::{GeminiClient, GeminiConfig};
pub use error::{Error, Result};
