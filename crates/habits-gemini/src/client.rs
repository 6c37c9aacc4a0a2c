//! [`GeminiClient`]: the Gemini implementation of [`Assistant`].

use std::time::Duration;

use habits_core::{
  assistant::Assistant,
  data_uri::DataUri,
  suggestion::{HabitSuggestion, parse_suggestions},
};
use reqwest::Client;
use serde::Deserialize;

use crate::{
  Error, Result, prompt,
  wire::{GenerateRequest, GenerateResponse, GenerationConfig, Part},
};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";

fn default_base_url() -> String { DEFAULT_BASE_URL.to_owned() }
fn default_text_model() -> String { DEFAULT_TEXT_MODEL.to_owned() }
fn default_image_model() -> String { DEFAULT_IMAGE_MODEL.to_owned() }
fn default_timeout_secs() -> u64 { 60 }

/// Connection settings for the Gemini API, usually the `[gemini]` table of
/// the server config.
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
  pub api_key:      String,
  #[serde(default = "default_base_url")]
  pub base_url:     String,
  /// Model used for suggestions and quotes.
  #[serde(default = "default_text_model")]
  pub text_model:   String,
  /// Model used for proof-image edits.
  #[serde(default = "default_image_model")]
  pub image_model:  String,
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
}

impl GeminiConfig {
  pub fn new(api_key: impl Into<String>) -> Self {
    Self {
      api_key:      api_key.into(),
      base_url:     default_base_url(),
      text_model:   default_text_model(),
      image_model:  default_image_model(),
      timeout_secs: default_timeout_secs(),
    }
  }
}

/// Async client for Gemini `generateContent`.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct GeminiClient {
  http:   Client,
  config: GeminiConfig,
}

impl GeminiClient {
  pub fn new(config: GeminiConfig) -> Result<Self> {
    let http = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .user_agent(concat!("habits/", env!("CARGO_PKG_VERSION")))
      .build()?;
    Ok(Self { http, config })
  }

  fn url(&self, model: &str) -> String {
    format!(
      "{}/models/{model}:generateContent",
      self.config.base_url.trim_end_matches('/')
    )
  }

  async fn generate(
    &self,
    model: &str,
    request: &GenerateRequest,
  ) -> Result<GenerateResponse> {
    tracing::debug!(model, "gemini generateContent");

    let resp = self
      .http
      .post(self.url(model))
      .header("x-goog-api-key", &self.config.api_key)
      .json(request)
      .send()
      .await?;

    let status = resp.status();
    if !status.is_success() {
      let body = resp.text().await.unwrap_or_default();
      return Err(Error::Http { status: status.as_u16(), body });
    }

    let bytes = resp.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
  }
}

impl Assistant for GeminiClient {
  type Error = Error;

  async fn suggest_habits(&self, goals: &str) -> Result<Vec<HabitSuggestion>> {
    let request = GenerateRequest::user(vec![Part::text(prompt::suggest_habits(goals))])
      .with_config(GenerationConfig {
        response_mime_type: Some("application/json".into()),
        response_schema:    Some(prompt::suggestion_schema()),
      });

    let response = self.generate(&self.config.text_model, &request).await?;
    Ok(parse_suggestions(response.text().as_deref())?)
  }

  async fn motivation(&self, habit_name: &str) -> Result<Option<String>> {
    let request =
      GenerateRequest::user(vec![Part::text(prompt::motivation(habit_name))]);

    let response = self.generate(&self.config.text_model, &request).await?;
    let quote = response
      .text()
      .map(|t| t.trim().to_owned())
      .filter(|t| !t.is_empty());
    if quote.is_none() {
      tracing::info!(finish_reason = ?response.finish_reason(), "gemini returned no quote");
    }
    Ok(quote)
  }

  async fn edit_proof_image(
    &self,
    image: &DataUri,
    prompt: &str,
  ) -> Result<Option<DataUri>> {
    let request = GenerateRequest::user(vec![
      Part::inline(image.mime_type.clone(), image.data.clone()),
      Part::text(prompt),
    ]);

    let response = self.generate(&self.config.image_model, &request).await?;
    match response.first_inline_data() {
      Some(inline) => {
        let edited = DataUri::new(inline.mime_type.clone(), inline.data.clone());
        edited.decode_bytes()?;
        Ok(Some(edited))
      }
      None => {
        tracing::info!(
          finish_reason = ?response.finish_reason(),
          "gemini image edit returned no image"
        );
        Ok(None)
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn url_joins_base_and_model() {
    let mut config = GeminiConfig::new("key");
    config.base_url = "http://localhost:8080/v1beta/".into();
    let client = GeminiClient::new(config).unwrap();
    assert_eq!(
      client.url("gemini-3-flash-preview"),
      "http://localhost:8080/v1beta/models/gemini-3-flash-preview:generateContent"
    );
  }

  #[test]
  fn config_fills_defaults() {
    let config: GeminiConfig = serde_json::from_str(r#"{"api_key":"k"}"#).unwrap();
    assert_eq!(config.text_model, DEFAULT_TEXT_MODEL);
    assert_eq!(config.image_model, DEFAULT_IMAGE_MODEL);
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.timeout_secs, 60);
  }

  #[tokio::test]
  async fn unreachable_upstream_is_a_transport_error() {
    let mut config = GeminiConfig::new("key");
    // Port 9 (discard) on localhost is closed in test environments.
    config.base_url = "http://127.0.0.1:9/v1beta".into();
    config.timeout_secs = 2;
    let client = GeminiClient::new(config).unwrap();

    let err = client.motivation("Read").await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
  }
}
