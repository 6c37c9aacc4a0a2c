//! Request and response bodies for `models/{model}:generateContent`.

use serde::{Deserialize, Serialize};

// ─── Request ─────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
  pub contents:          Vec<Content>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub generation_config: Option<GenerationConfig>,
}

impl GenerateRequest {
  /// A single user turn made of `parts`.
  pub fn user(parts: Vec<Part>) -> Self {
    Self {
      contents:          vec![Content { role: Some("user".into()), parts }],
      generation_config: None,
    }
  }

  pub fn with_config(mut self, config: GenerationConfig) -> Self {
    self.generation_config = Some(config);
    self
  }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub response_mime_type: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub response_schema:    Option<serde_json::Value>,
}

// ─── Shared ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub role:  Option<String>,
  #[serde(default)]
  pub parts: Vec<Part>,
}

/// One part of a content turn. Gemini sends exactly one of the fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub text:        Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub inline_data: Option<InlineData>,
}

impl Part {
  pub fn text(text: impl Into<String>) -> Self {
    Self { text: Some(text.into()), inline_data: None }
  }

  pub fn inline(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
    Self {
      text:        None,
      inline_data: Some(InlineData { mime_type: mime_type.into(), data: data.into() }),
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
  pub mime_type: String,
  /// Base64 payload.
  pub data:      String,
}

// ─── Response ────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
  #[serde(default)]
  pub candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
  #[serde(default)]
  pub content:       Option<Content>,
  #[serde(default)]
  pub finish_reason: Option<String>,
}

impl GenerateResponse {
  fn first_parts(&self) -> &[Part] {
    self
      .candidates
      .first()
      .and_then(|c| c.content.as_ref())
      .map(|c| c.parts.as_slice())
      .unwrap_or_default()
  }

  /// Concatenated text of the first candidate, or `None` if it has no text.
  pub fn text(&self) -> Option<String> {
    let texts: Vec<&str> = self
      .first_parts()
      .iter()
      .filter_map(|p| p.text.as_deref())
      .collect();
    if texts.is_empty() { None } else { Some(texts.concat()) }
  }

  /// Why the first candidate stopped, e.g. `STOP` or `SAFETY`.
  pub fn finish_reason(&self) -> Option<&str> {
    self.candidates.first().and_then(|c| c.finish_reason.as_deref())
  }

  /// The first inline-data part of the first candidate.
  pub fn first_inline_data(&self) -> Option<&InlineData> {
    self.first_parts().iter().find_map(|p| p.inline_data.as_ref())
  }
}
