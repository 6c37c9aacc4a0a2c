//! Async HTTP client wrapping the habits JSON API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use habits_core::{
  completion::{Toggle, ToggleStatus},
  data_uri::DataUri,
  day::TodayView,
  habit::{Habit, HabitId, HabitStats, NewHabit},
  suggestion::HabitSuggestion,
};
use reqwest::{Client, Response};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::json;

/// Connection settings for the habits API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url:     String,
  pub timeout_secs: u64,
}

/// Async HTTP client for the habits JSON REST API.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

#[derive(Deserialize)]
struct ErrorBody {
  error: String,
}

#[derive(Deserialize)]
struct Created {
  id: HabitId,
}

#[derive(Deserialize)]
struct ToggleResponse {
  status: ToggleStatus,
}

#[derive(Deserialize)]
struct QuoteResponse {
  quote: Option<String>,
}

#[derive(Deserialize)]
struct ImageResponse {
  image: Option<String>,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}/api{}", self.config.base_url.trim_end_matches('/'), path)
  }

  /// Turn a non-2xx response into an error carrying the server's message,
  /// otherwise deserialise the body.
  async fn read<T: DeserializeOwned>(resp: Response, what: &str) -> Result<T> {
    let status = resp.status();
    if !status.is_success() {
      let message = resp
        .json::<ErrorBody>()
        .await
        .map(|b| b.error)
        .unwrap_or_else(|_| status.to_string());
      return Err(anyhow!("{what} → {status}: {message}"));
    }
    resp.json().await.with_context(|| format!("deserialising {what} response"))
  }

  // ── Habits ────────────────────────────────────────────────────────────────

  /// `GET /api/habits/today[?date=...]`
  pub async fn today(&self, date: NaiveDate) -> Result<TodayView> {
    let resp = self
      .client
      .get(self.url("/habits/today"))
      .query(&[("date", date.to_string())])
      .send()
      .await
      .context("GET /habits/today failed")?;
    Self::read(resp, "GET /habits/today").await
  }

  /// `GET /api/habits/{id}`
  pub async fn get_habit(&self, id: HabitId) -> Result<Habit> {
    let resp = self
      .client
      .get(self.url(&format!("/habits/{id}")))
      .send()
      .await
      .context("GET /habits/{id} failed")?;
    Self::read(resp, "GET /habits/{id}").await
  }

  /// `POST /api/habits`
  pub async fn create_habit(&self, habit: &NewHabit) -> Result<HabitId> {
    let resp = self
      .client
      .post(self.url("/habits"))
      .json(habit)
      .send()
      .await
      .context("POST /habits failed")?;
    let created: Created = Self::read(resp, "POST /habits").await?;
    Ok(created.id)
  }

  /// `DELETE /api/habits/{id}`
  pub async fn delete_habit(&self, id: HabitId) -> Result<()> {
    let resp = self
      .client
      .delete(self.url(&format!("/habits/{id}")))
      .send()
      .await
      .context("DELETE /habits failed")?;
    let _: serde_json::Value = Self::read(resp, "DELETE /habits").await?;
    Ok(())
  }

  // ── Completions ───────────────────────────────────────────────────────────

  /// `POST /api/complete`
  pub async fn toggle(&self, toggle: &Toggle) -> Result<ToggleStatus> {
    let resp = self
      .client
      .post(self.url("/complete"))
      .json(toggle)
      .send()
      .await
      .context("POST /complete failed")?;
    let body: ToggleResponse = Self::read(resp, "POST /complete").await?;
    Ok(body.status)
  }

  /// `GET /api/stats`
  pub async fn stats(&self) -> Result<Vec<HabitStats>> {
    let resp = self
      .client
      .get(self.url("/stats"))
      .send()
      .await
      .context("GET /stats failed")?;
    Self::read(resp, "GET /stats").await
  }

  // ── Assistant ─────────────────────────────────────────────────────────────

  /// `POST /api/ai/suggestions`
  pub async fn suggest(&self, goals: &str) -> Result<Vec<HabitSuggestion>> {
    let resp = self
      .client
      .post(self.url("/ai/suggestions"))
      .json(&json!({ "goals": goals }))
      .send()
      .await
      .context("POST /ai/suggestions failed")?;
    Self::read(resp, "POST /ai/suggestions").await
  }

  /// `POST /api/ai/motivation`
  pub async fn motivation(&self, habit_name: &str) -> Result<Option<String>> {
    let resp = self
      .client
      .post(self.url("/ai/motivation"))
      .json(&json!({ "habit_name": habit_name }))
      .send()
      .await
      .context("POST /ai/motivation failed")?;
    let body: QuoteResponse = Self::read(resp, "POST /ai/motivation").await?;
    Ok(body.quote)
  }

  /// `POST /api/ai/proof-edits`
  pub async fn edit_proof(&self, image: &DataUri, prompt: &str) -> Result<Option<DataUri>> {
    let resp = self
      .client
      .post(self.url("/ai/proof-edits"))
      .json(&json!({ "image": image.to_string(), "prompt": prompt }))
      .send()
      .await
      .context("POST /ai/proof-edits failed")?;
    let body: ImageResponse = Self::read(resp, "POST /ai/proof-edits").await?;
    body
      .image
      .map(|s| s.parse::<DataUri>().context("server returned a malformed image"))
      .transpose()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn client(base_url: &str) -> ApiClient {
    ApiClient::new(ApiConfig { base_url: base_url.to_string(), timeout_secs: 2 }).unwrap()
  }

  #[test]
  fn url_joins_api_prefix() {
    assert_eq!(
      client("http://localhost:3000/").url("/habits/today"),
      "http://localhost:3000/api/habits/today"
    );
    assert_eq!(client("http://h").url("/stats"), "http://h/api/stats");
  }

  #[tokio::test]
  async fn unreachable_server_is_an_error() {
    let err = client("http://127.0.0.1:9").stats().await.unwrap_err();
    assert!(err.to_string().contains("GET /stats failed"));
  }
}
