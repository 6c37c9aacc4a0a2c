//! Habit suggestions produced by the AI assistant.
//!
//! Upstream output is never trusted: the raw text is parsed as JSON and every
//! entry is checked before a typed [`HabitSuggestion`] is handed out.

use serde::{Deserialize, Serialize};

use crate::{Error, Result, habit::NewHabit};

/// Upper bound on the number of suggestions accepted from one response.
pub const MAX_SUGGESTIONS: usize = 10;

/// A suggested habit: a name, an icon name and a hex color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitSuggestion {
  pub name:  String,
  pub icon:  String,
  pub color: String,
}

impl HabitSuggestion {
  pub fn validate(&self) -> Result<()> {
    if self.name.trim().is_empty() {
      return Err(Error::InvalidSuggestion("empty name".into()));
    }
    if self.icon.trim().is_empty() {
      return Err(Error::InvalidSuggestion(format!(
        "empty icon for {:?}",
        self.name
      )));
    }
    if !is_hex_color(&self.color) {
      return Err(Error::InvalidSuggestion(format!(
        "color {:?} is not a hex color",
        self.color
      )));
    }
    Ok(())
  }
}

impl From<HabitSuggestion> for NewHabit {
  fn from(s: HabitSuggestion) -> Self {
    NewHabit {
      name:      s.name,
      emoji:     Some(s.icon),
      color:     Some(s.color),
      frequency: None,
    }
  }
}

/// Parse the assistant's response text into validated suggestions.
///
/// Absent or blank text yields an empty list. Anything else must be a JSON
/// array of at most [`MAX_SUGGESTIONS`] valid objects.
pub fn parse_suggestions(text: Option<&str>) -> Result<Vec<HabitSuggestion>> {
  let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) else {
    return Ok(Vec::new());
  };

  let value: serde_json::Value = serde_json::from_str(text)?;
  let items = value
    .as_array()
    .ok_or_else(|| Error::InvalidSuggestion("expected a JSON array".into()))?;

  if items.len() > MAX_SUGGESTIONS {
    return Err(Error::InvalidSuggestion(format!(
      "{} suggestions exceeds the limit of {MAX_SUGGESTIONS}",
      items.len()
    )));
  }

  items
    .iter()
    .map(|item| {
      let suggestion: HabitSuggestion = serde_json::from_value(item.clone())
        .map_err(|e| Error::InvalidSuggestion(e.to_string()))?;
      suggestion.validate()?;
      Ok(suggestion)
    })
    .collect()
}

/// `#RGB` or `#RRGGBB`.
fn is_hex_color(s: &str) -> bool {
  match s.strip_prefix('#') {
    Some(hex) => {
      matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
    }
    None => false,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn absent_or_blank_text_is_empty() {
    assert!(parse_suggestions(None).unwrap().is_empty());
    assert!(parse_suggestions(Some("  \n")).unwrap().is_empty());
  }

  #[test]
  fn parses_valid_array() {
    let text = r##"[
      {"name": "Drink water", "icon": "GlassWater", "color": "#007AFF"},
      {"name": "Walk", "icon": "Footprints", "color": "#3c3"}
    ]"##;
    let out = parse_suggestions(Some(text)).unwrap();
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].name, "Drink water");
    assert_eq!(out[1].color, "#3c3");
  }

  #[test]
  fn rejects_non_array() {
    let err = parse_suggestions(Some(r#"{"name":"x"}"#)).unwrap_err();
    assert!(matches!(err, Error::InvalidSuggestion(_)));
  }

  #[test]
  fn rejects_malformed_json() {
    let err = parse_suggestions(Some("[{")).unwrap_err();
    assert!(matches!(err, Error::Serialization(_)));
  }

  #[test]
  fn rejects_missing_field_and_bad_color() {
    let missing = parse_suggestions(Some(r##"[{"name":"Read","color":"#fff"}]"##));
    assert!(matches!(missing, Err(Error::InvalidSuggestion(_))));

    let bad_color =
      parse_suggestions(Some(r#"[{"name":"Read","icon":"Book","color":"blue"}]"#));
    assert!(matches!(bad_color, Err(Error::InvalidSuggestion(_))));

    let wrong_type =
      parse_suggestions(Some(r##"[{"name":42,"icon":"Book","color":"#fff"}]"##));
    assert!(matches!(wrong_type, Err(Error::InvalidSuggestion(_))));
  }

  #[test]
  fn rejects_oversized_response() {
    let one = r##"{"name":"n","icon":"i","color":"#000"}"##;
    let text = format!("[{}]", vec![one; MAX_SUGGESTIONS + 1].join(","));
    assert!(matches!(
      parse_suggestions(Some(&text)),
      Err(Error::InvalidSuggestion(_))
    ));
  }

  #[test]
  fn suggestion_becomes_new_habit() {
    let habit = NewHabit::from(HabitSuggestion {
      name:  "Journal".into(),
      icon:  "Notebook".into(),
      color: "#FF9500".into(),
    });
    assert_eq!(habit.name, "Journal");
    assert_eq!(habit.emoji.as_deref(), Some("Notebook"));
    assert_eq!(habit.frequency_or_default(), "daily");
  }
}
