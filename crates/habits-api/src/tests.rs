//! Router tests against an in-memory store and a scripted assistant.

use std::sync::Arc;

use axum::{
  Router,
  body::Body,
  http::{Request, StatusCode, header},
};
use chrono::NaiveDate;
use habits_core::{
  assistant::Assistant,
  completion::{Completion, Toggle, ToggleStatus},
  data_uri::DataUri,
  day::DaySnapshot,
  habit::{Habit, HabitId, HabitStats, NewHabit},
  store::HabitStore,
  suggestion::{HabitSuggestion, parse_suggestions},
};
use habits_store_sqlite::SqliteStore;
use serde_json::{Value, json};
use tower::ServiceExt as _;

use crate::api_router;

// ─── Scripted assistant ──────────────────────────────────────────────────────

/// Returns canned responses; `suggestions_json` is run through the same
/// validation as real upstream output.
struct ScriptedAssistant {
  suggestions_json: Option<&'static str>,
  quote:            Option<&'static str>,
  edited:           Option<&'static str>,
}

impl Default for ScriptedAssistant {
  fn default() -> Self {
    Self {
      suggestions_json: Some(
        r##"[{"name":"Drink water","icon":"GlassWater","color":"#007AFF"}]"##,
      ),
      quote:            Some("One page at a time."),
      edited:           Some("data:image/png;base64,iVBORw0KGgo="),
    }
  }
}

impl Assistant for ScriptedAssistant {
  type Error = habits_core::Error;

  async fn suggest_habits(&self, _goals: &str) -> habits_core::Result<Vec<HabitSuggestion>> {
    parse_suggestions(self.suggestions_json)
  }

  async fn motivation(&self, _habit_name: &str) -> habits_core::Result<Option<String>> {
    Ok(self.quote.map(str::to_owned))
  }

  async fn edit_proof_image(
    &self,
    _image: &DataUri,
    _prompt: &str,
  ) -> habits_core::Result<Option<DataUri>> {
    self.edited.map(str::parse).transpose()
  }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

async fn app_with(assistant: Option<ScriptedAssistant>) -> Router {
  let store = SqliteStore::open_in_memory().await.unwrap();
  api_router(Arc::new(store), assistant.map(Arc::new))
}

async fn app() -> Router { app_with(Some(ScriptedAssistant::default())).await }

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
  let mut builder = Request::builder().method(method).uri(uri);
  let body = match body {
    Some(v) => {
      builder = builder.header(header::CONTENT_TYPE, "application/json");
      Body::from(v.to_string())
    }
    None => Body::empty(),
  };
  let resp = app
    .clone()
    .oneshot(builder.body(body).unwrap())
    .await
    .unwrap();

  let status = resp.status();
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  let json = if bytes.is_empty() {
    Value::Null
  } else {
    serde_json::from_slice(&bytes).unwrap_or(Value::Null)
  };
  (status, json)
}

async fn create(app: &Router, body: Value) -> i64 {
  let (status, json) = send(app, "POST", "/habits", Some(body)).await;
  assert_eq!(status, StatusCode::CREATED, "{json}");
  json["id"].as_i64().unwrap()
}

async fn toggle(app: &Router, body: Value) -> String {
  let (status, json) = send(app, "POST", "/complete", Some(body)).await;
  assert_eq!(status, StatusCode::OK, "{json}");
  json["status"].as_str().unwrap().to_owned()
}

// ─── Habits ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_then_list_for_day() {
  let app = app().await;
  let id = create(&app, json!({ "name": "Read", "emoji": "📖" })).await;
  assert_eq!(id, 1);

  let (status, json) = send(&app, "GET", "/habits?date=2024-01-01", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(json["date"], "2024-01-01");
  assert_eq!(json["habits"][0]["name"], "Read");
  assert_eq!(json["habits"][0]["emoji"], "📖");
  assert_eq!(json["habits"][0]["frequency"], "daily");
  assert_eq!(json["completions"], json!([]));
}

#[tokio::test]
async fn create_accepts_icon_alias() {
  let app = app().await;
  let id = create(&app, json!({ "name": "Stretch", "icon": "Activity", "color": "#34C759" })).await;

  let (status, json) = send(&app, "GET", &format!("/habits/{id}"), None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(json["emoji"], "Activity");
  assert_eq!(json["color"], "#34C759");
}

#[tokio::test]
async fn create_rejects_blank_name() {
  let app = app().await;
  let (status, json) = send(&app, "POST", "/habits", Some(json!({ "name": "  " }))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(json["error"].as_str().unwrap().contains("name"));
}

#[tokio::test]
async fn get_missing_habit_is_404() {
  let app = app().await;
  let (status, _) = send(&app, "GET", "/habits/9", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_removes_habit_and_completions() {
  let app = app().await;
  let keep = create(&app, json!({ "name": "Keep" })).await;
  let gone = create(&app, json!({ "name": "Gone" })).await;
  toggle(&app, json!({ "habit_id": keep, "date": "2024-01-01" })).await;
  toggle(&app, json!({ "habit_id": gone, "date": "2024-01-01" })).await;

  let (status, json) = send(&app, "DELETE", &format!("/habits/{gone}"), None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(json, json!({ "success": true }));

  let (_, json) = send(&app, "GET", "/habits?date=2024-01-01", None).await;
  assert_eq!(json["habits"].as_array().unwrap().len(), 1);
  let completions = json["completions"].as_array().unwrap();
  assert_eq!(completions.len(), 1);
  assert_eq!(completions[0]["habit_id"], keep);

  let (status, _) = send(&app, "DELETE", &format!("/habits/{gone}"), None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

// ─── Toggle ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn toggle_follows_the_example_scenario() {
  let app = app().await;
  let id = create(&app, json!({ "name": "Read", "emoji": "📖" })).await;
  let proof = "data:image/png;base64,iVBORw0KGgo=";

  let plain = json!({ "habit_id": id, "date": "2024-01-01" });
  let with_proof = json!({ "habit_id": id, "date": "2024-01-01", "proof_image_url": proof });

  assert_eq!(toggle(&app, plain.clone()).await, "completed");
  assert_eq!(toggle(&app, plain).await, "uncompleted");
  assert_eq!(toggle(&app, with_proof.clone()).await, "completed");
  assert_eq!(toggle(&app, with_proof).await, "updated");

  let (_, json) = send(&app, "GET", "/habits/today?date=2024-01-01", None).await;
  assert_eq!(json["habits"][0]["completed_today"], true);
  assert_eq!(json["habits"][0]["proof_image_url"], proof);
}

#[tokio::test]
async fn toggle_unknown_habit_is_404() {
  let app = app().await;
  let (status, _) = send(
    &app,
    "POST",
    "/complete",
    Some(json!({ "habit_id": 5, "date": "2024-01-01" })),
  )
  .await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

/// Deletes the habit right before toggling it, as if a concurrent `DELETE`
/// landed between request parsing and the write.
struct VanishingStore(SqliteStore);

impl HabitStore for VanishingStore {
  type Error = habits_store_sqlite::Error;

  async fn create_habit(&self, input: NewHabit) -> Result<Habit, Self::Error> {
    self.0.create_habit(input).await
  }

  async fn get_habit(&self, id: HabitId) -> Result<Option<Habit>, Self::Error> {
    self.0.get_habit(id).await
  }

  async fn list_habits(&self) -> Result<Vec<Habit>, Self::Error> { self.0.list_habits().await }

  async fn delete_habit(&self, id: HabitId) -> Result<bool, Self::Error> {
    self.0.delete_habit(id).await
  }

  async fn toggle_completion(&self, toggle: Toggle) -> Result<ToggleStatus, Self::Error> {
    self.0.delete_habit(toggle.habit_id).await?;
    self.0.toggle_completion(toggle).await
  }

  async fn completions_on(&self, date: NaiveDate) -> Result<Vec<Completion>, Self::Error> {
    self.0.completions_on(date).await
  }

  async fn day_snapshot(&self, date: NaiveDate) -> Result<DaySnapshot, Self::Error> {
    self.0.day_snapshot(date).await
  }

  async fn stats(&self) -> Result<Vec<HabitStats>, Self::Error> { self.0.stats().await }
}

#[tokio::test]
async fn toggle_of_habit_deleted_mid_request_is_404() {
  let store = SqliteStore::open_in_memory().await.unwrap();
  let habit = store.create_habit(NewHabit::new("Read")).await.unwrap();
  let app = api_router::<_, ScriptedAssistant>(Arc::new(VanishingStore(store)), None);

  let (status, json) = send(
    &app,
    "POST",
    "/complete",
    Some(json!({ "habit_id": habit.id, "date": "2024-01-01" })),
  )
  .await;
  assert_eq!(status, StatusCode::NOT_FOUND, "{json}");
  assert_eq!(json["error"], format!("habit {} not found", habit.id));
}

#[tokio::test]
async fn toggle_rejects_malformed_date() {
  let app = app().await;
  let id = create(&app, json!({ "name": "Read" })).await;
  let (status, json) = send(
    &app,
    "POST",
    "/complete",
    Some(json!({ "habit_id": id, "date": "Jan 1" })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(json["error"].is_string(), "{json}");
}

#[tokio::test]
async fn malformed_query_and_path_answer_json_errors() {
  let app = app().await;

  let (status, json) = send(&app, "GET", "/habits/today?date=yesterday", None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(json["error"].is_string(), "{json}");

  let (status, json) = send(&app, "GET", "/habits/abc", None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(json["error"].is_string(), "{json}");
}

#[tokio::test]
async fn non_json_body_answers_json_error() {
  let app = app().await;
  let resp = app
    .clone()
    .oneshot(
      Request::post("/habits")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("Read"))
        .unwrap(),
    )
    .await
    .unwrap();
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  let json: Value = serde_json::from_slice(&bytes).unwrap();
  assert!(json["error"].is_string(), "{json}");
}

// ─── Today view ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn today_reports_status_and_progress() {
  let app = app().await;
  let read = create(&app, json!({ "name": "Read" })).await;
  create(&app, json!({ "name": "Run" })).await;
  toggle(&app, json!({ "habit_id": read, "date": "2024-06-01" })).await;

  let (status, json) = send(&app, "GET", "/habits/today?date=2024-06-01", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(json["progress"], json!({ "completed": 1, "total": 2, "percent": 50 }));
  assert_eq!(json["habits"][0]["completed_today"], true);
  assert_eq!(json["habits"][1]["completed_today"], false);
  assert_eq!(json["habits"][1]["proof_image_url"], Value::Null);

  // Another day has nothing done.
  let (_, json) = send(&app, "GET", "/habits/today?date=2024-06-02", None).await;
  assert_eq!(json["progress"]["completed"], 0);
}

// ─── Stats ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn stats_counts_completions() {
  let app = app().await;
  let read = create(&app, json!({ "name": "Read" })).await;
  create(&app, json!({ "name": "Run" })).await;
  toggle(&app, json!({ "habit_id": read, "date": "2024-01-01" })).await;
  toggle(&app, json!({ "habit_id": read, "date": "2024-01-02" })).await;

  let (status, json) = send(&app, "GET", "/stats", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(
    json,
    json!([
      { "habit_id": 1, "name": "Read", "completion_count": 2 },
      { "habit_id": 2, "name": "Run", "completion_count": 0 }
    ])
  );
}

// ─── Assistant ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn suggestions_are_returned_typed() {
  let app = app().await;
  let (status, json) = send(
    &app,
    "POST",
    "/ai/suggestions",
    Some(json!({ "goals": "be healthier" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(json[0]["name"], "Drink water");
  assert_eq!(json[0]["icon"], "GlassWater");
}

#[tokio::test]
async fn invalid_upstream_suggestions_are_502() {
  let app = app_with(Some(ScriptedAssistant {
    suggestions_json: Some(r#"[{"name":"Nap","icon":"Bed","color":"purple"}]"#),
    ..ScriptedAssistant::default()
  }))
  .await;

  let (status, json) = send(
    &app,
    "POST",
    "/ai/suggestions",
    Some(json!({ "goals": "rest" })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_GATEWAY);
  assert!(json["error"].as_str().unwrap().contains("purple"));
}

#[tokio::test]
async fn absent_suggestion_text_is_empty_list() {
  let app = app_with(Some(ScriptedAssistant {
    suggestions_json: None,
    ..ScriptedAssistant::default()
  }))
  .await;

  let (status, json) = send(
    &app,
    "POST",
    "/ai/suggestions",
    Some(json!({ "goals": "rest" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(json, json!([]));
}

#[tokio::test]
async fn blank_goals_are_rejected() {
  let app = app().await;
  let (status, _) =
    send(&app, "POST", "/ai/suggestions", Some(json!({ "goals": "" }))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn motivation_returns_quote() {
  let app = app().await;
  let (status, json) = send(
    &app,
    "POST",
    "/ai/motivation",
    Some(json!({ "habit_name": "Read" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(json["quote"], "One page at a time.");
}

#[tokio::test]
async fn proof_edit_requires_data_uri() {
  let app = app().await;
  let (status, _) = send(
    &app,
    "POST",
    "/ai/proof-edits",
    Some(json!({ "image": "https://example.com/a.png", "prompt": "brighter" })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);

  let (status, json) = send(
    &app,
    "POST",
    "/ai/proof-edits",
    Some(json!({ "image": "data:image/jpeg;base64,/9j/", "prompt": "brighter" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(json["image"], "data:image/png;base64,iVBORw0KGgo=");
}

#[tokio::test]
async fn proof_edit_without_image_returns_null() {
  let app = app_with(Some(ScriptedAssistant {
    edited: None,
    ..ScriptedAssistant::default()
  }))
  .await;

  let (status, json) = send(
    &app,
    "POST",
    "/ai/proof-edits",
    Some(json!({ "image": "data:image/png;base64,iVBORw0KGgo=", "prompt": "sepia" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(json["image"], Value::Null);
}

#[tokio::test]
async fn missing_assistant_is_503() {
  let app = app_with(None).await;
  let (status, json) = send(
    &app,
    "POST",
    "/ai/motivation",
    Some(json!({ "habit_name": "Read" })),
  )
  .await;
  assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
  assert!(json["error"].is_string());
}
