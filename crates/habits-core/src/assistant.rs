//! The `Assistant` trait: generative enrichment for habits.
//!
//! Implemented by `habits-gemini`. Every call is a single upstream request;
//! there is no retry or caching at this layer.

use std::future::Future;

use crate::{data_uri::DataUri, suggestion::HabitSuggestion};

pub trait Assistant: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Suggest daily habits for free-text goals. Output is validated; an
  /// absent response yields an empty list.
  fn suggest_habits<'a>(
    &'a self,
    goals: &'a str,
  ) -> impl Future<Output = Result<Vec<HabitSuggestion>, Self::Error>> + Send + 'a;

  /// A short motivational quote for someone tracking `habit_name`.
  /// `None` when the upstream returned no text.
  fn motivation<'a>(
    &'a self,
    habit_name: &'a str,
  ) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send + 'a;

  /// Edit a proof image following `prompt`. Returns the first image in the
  /// response, or `None` if the response carried no image.
  fn edit_proof_image<'a>(
    &'a self,
    image: &'a DataUri,
    prompt: &'a str,
  ) -> impl Future<Output = Result<Option<DataUri>, Self::Error>> + Send + 'a;
}
