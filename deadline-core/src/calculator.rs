//! Deadline calculation: subtract each rule's offset from the trial date.

use chrono::{Days, NaiveDate};

use crate::entry::{DeadlineEntry, parse_wire_date};
use crate::rules::RuleTable;

/// Apply every rule to `trial_date`, preserving rule order.
///
/// Plain calendar subtraction: no business-day or holiday adjustment.
pub fn compute(trial_date: NaiveDate, rules: &RuleTable) -> Vec<DeadlineEntry> {
    rules
        .iter()
        .filter_map(|rule| {
            let date = trial_date.checked_sub_days(Days::new(u64::from(rule.offset_days)));
            if date.is_none() {
                log::warn!(
                    "Skipping '{}': {} days before {} is out of range",
                    rule.label,
                    rule.offset_days,
                    trial_date
                );
            }
            date.map(|date| {
                log::trace!("{} -> {}", rule.label, date);
                DeadlineEntry::new(rule.label.clone(), date)
            })
        })
        .collect()
}

/// Compute deadlines from raw trial date text (YYYY-MM-DD).
///
/// Missing or unparsable text yields no deadlines rather than an error.
pub fn compute_deadlines(trial_date_text: &str, rules: &RuleTable) -> Vec<DeadlineEntry> {
    match parse_wire_date(trial_date_text) {
        Some(trial_date) => compute(trial_date, rules),
        None => {
            log::debug!("Ignoring unparsable trial date {:?}", trial_date_text);
            Vec::new()
        }
    }
}
