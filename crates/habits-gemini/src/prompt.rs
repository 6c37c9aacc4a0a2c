//! Prompt text and response schemas.

use serde_json::json;

pub fn suggest_habits(goals: &str) -> String {
  format!(
    "Based on these goals: \"{goals}\", suggest 3-5 daily habits. Return them \
     as a JSON array of objects with \"name\", \"icon\" (lucide icon name), and \
     \"color\" (hex)."
  )
}

pub fn motivation(habit_name: &str) -> String {
  format!(
    "Give me a short, punchy, Apple-style motivational quote for someone \
     tracking their \"{habit_name}\" habit. Keep it under 15 words."
  )
}

/// Schema constraining the suggestion response to `[{name, icon, color}]`.
pub fn suggestion_schema() -> serde_json::Value {
  json!({
    "type": "ARRAY",
    "items": {
      "type": "OBJECT",
      "properties": {
        "name":  { "type": "STRING" },
        "icon":  { "type": "STRING" },
        "color": { "type": "STRING" }
      },
      "required": ["name", "icon", "color"]
    }
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn prompts_embed_their_input() {
    assert!(suggest_habits("sleep better").contains("\"sleep better\""));
    assert!(motivation("Read").contains("\"Read\" habit"));
  }

  #[test]
  fn schema_requires_all_fields() {
    let schema = suggestion_schema();
    assert_eq!(schema["items"]["required"], json!(["name", "icon", "color"]));
  }
}
