//! Colored terminal rendering for deadline types.

use chrono::NaiveDate;
use deadline_core::{DeadlineEntry, DeadlineRule};
use owo_colors::OwoColorize;

/// Extension trait for colored terminal rendering.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for DeadlineRule {
    fn render(&self) -> String {
        let days = format!("{:>4} {}", self.offset_days, pluralize("day", self.offset_days as usize));
        format!("{}  {}", days.dimmed(), self.label)
    }
}

impl Render for DeadlineEntry {
    fn render(&self) -> String {
        format!(
            "{}  {}",
            self.date.format("%a %m/%d/%Y").to_string().cyan(),
            self.event
        )
    }
}

/// Render computed deadlines under a trial date header.
pub fn render_deadlines(trial_date: NaiveDate, entries: &[DeadlineEntry]) -> Vec<String> {
    let mut lines = vec![format!(
        "⚖️  Trial date: {}",
        trial_date.format("%A, %B %-d, %Y").bold()
    )];

    for entry in entries {
        let days_before = (trial_date - entry.date).num_days();
        lines.push(format!(
            "   {} {}",
            entry.render(),
            format!("({} before trial)", days_label(days_before)).dimmed()
        ));
    }

    lines
}

fn days_label(days: i64) -> String {
    format!("{} {}", days, pluralize("day", days.unsigned_abs() as usize))
}

fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}
