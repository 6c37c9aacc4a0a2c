//! Plain-text rendering of API responses.

use habits_core::{
  day::{HabitWithStatus, TodayView},
  habit::HabitStats,
  suggestion::HabitSuggestion,
};

fn habit_line(h: &HabitWithStatus) -> String {
  let mark = if h.completed_today { "[x]" } else { "[ ]" };
  let emoji = h.habit.emoji.as_deref().unwrap_or(" ");
  let mut line = format!("{mark} {:>4}  {emoji}  {}", h.habit.id, h.habit.name);
  if h.proof_image_url.is_some() {
    line.push_str("  (proof)");
  }
  line
}

pub fn today(view: &TodayView) -> String {
  let mut out = String::new();
  let p = view.progress;
  out.push_str(&format!(
    "{}  {}/{} done ({}%)\n",
    view.date, p.completed, p.total, p.percent
  ));
  if view.habits.is_empty() {
    out.push_str("no habits yet; add one with `habits add <name>`\n");
  }
  for h in &view.habits {
    out.push_str(&habit_line(h));
    out.push('\n');
  }
  out
}

pub fn stats(stats: &[HabitStats]) -> String {
  let width = stats.iter().map(|s| s.name.chars().count()).max().unwrap_or(0);
  stats
    .iter()
    .map(|s| format!("{:>4}  {:<width$}  {}\n", s.habit_id, s.name, s.completion_count))
    .collect()
}

pub fn suggestions(suggestions: &[HabitSuggestion]) -> String {
  if suggestions.is_empty() {
    return "no suggestions\n".to_string();
  }
  suggestions
    .iter()
    .enumerate()
    .map(|(i, s)| format!("{}. {}  {}  {}\n", i + 1, s.icon, s.name, s.color))
    .collect()
}

#[cfg(test)]
mod tests {
  use chrono::{NaiveDate, Utc};
  use habits_core::{
    completion::Completion,
    day::DaySnapshot,
    habit::Habit,
  };

  use super::*;

  fn habit(id: i64, name: &str) -> Habit {
    Habit {
      id,
      name: name.to_string(),
      emoji: Some("📖".to_string()),
      color: None,
      frequency: "daily".to_string(),
      created_at: Utc::now(),
    }
  }

  #[test]
  fn today_marks_completed_habits() {
    let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let snapshot = DaySnapshot {
      date,
      habits: vec![habit(1, "Read"), habit(2, "Run")],
      completions: vec![Completion {
        id: 7,
        habit_id: 2,
        completed_at: date,
        proof_image_url: Some("https://x.test/p.png".to_string()),
      }],
    };

    let text = today(&TodayView::from(&snapshot));
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines[0], "2024-01-01  1/2 done (50%)");
    assert!(lines[1].starts_with("[ ]"));
    assert!(lines[2].starts_with("[x]"));
    assert!(lines[2].ends_with("Run  (proof)"));
  }

  #[test]
  fn stats_are_aligned() {
    let text = stats(&[
      HabitStats { habit_id: 1, name: "Read".into(), completion_count: 3 },
      HabitStats { habit_id: 2, name: "Meditate".into(), completion_count: 0 },
    ]);
    assert_eq!(text, "   1  Read      3\n   2  Meditate  0\n");
  }

  #[test]
  fn empty_suggestions() {
    assert_eq!(suggestions(&[]), "no suggestions\n");
  }
}
