//! Deadline rules: named filing obligations with a fixed offset before trial.

use serde::{Deserialize, Serialize};

use crate::error::{DeadlineError, DeadlineResult};

/// Default trial-related deadlines, in display order (days BEFORE trial).
const DEFAULT_RULES: &[(&str, u32)] = &[
    ("Join additional parties", 60),
    ("Amend pleadings", 7),
    ("File motions to limit/suppress/exclude evidence or testimony", 30),
    ("Last day to propound discovery to opposing party", 60),
    ("Complete all other discovery", 30),
    ("Conduct mediation", 30),
    ("Complete depositions of fact witnesses", 30),
    ("Complete depositions of experts", 30),
    ("Designate expert witnesses for affirmative relief", 120),
    ("Designate other expert witnesses", 90),
    ("Designate rebuttal expert witnesses", 15),
    ("Submit proposed findings of fact and conclusions of law", 10),
    ("Submit proposed jury charges, instructions and definitions", 7),
    ("File business records affidavit under TRE 902(10)", 14),
];

/// A named filing obligation that falls `offset_days` calendar days before trial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadlineRule {
    pub label: String,
    pub offset_days: u32,
}

impl DeadlineRule {
    pub fn new(label: impl Into<String>, offset_days: u32) -> Self {
        DeadlineRule {
            label: label.into(),
            offset_days,
        }
    }
}

/// Ordered, read-only table of deadline rules.
///
/// Built once at startup (from `Default` or from settings) and shared by
/// reference afterwards. Order only affects display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RuleTable {
    rules: Vec<DeadlineRule>,
}

impl RuleTable {
    /// Build a table from rules, rejecting blank labels.
    pub fn new(rules: Vec<DeadlineRule>) -> DeadlineResult<Self> {
        if let Some(pos) = rules.iter().position(|r| r.label.trim().is_empty()) {
            return Err(DeadlineError::Config(format!(
                "Deadline rule #{} has an empty label",
                pos + 1
            )));
        }
        Ok(RuleTable { rules })
    }

    pub fn iter(&self) -> impl Iterator<Item = &DeadlineRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        RuleTable {
            rules: DEFAULT_RULES
                .iter()
                .map(|(label, days)| DeadlineRule::new(*label, *days))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RuleTable {
    type Item = &'a DeadlineRule;
    type IntoIter = std::slice::Iter<'a, DeadlineRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_keeps_declared_order() {
        let table = RuleTable::default();
        assert_eq!(table.len(), 14);

        let first = table.iter().next().unwrap();
        assert_eq!(first.label, "Join additional parties");
        assert_eq!(first.offset_days, 60);

        let last = table.iter().last().unwrap();
        assert_eq!(last.label, "File business records affidavit under TRE 902(10)");
        assert_eq!(last.offset_days, 14);
    }

    #[test]
    fn test_new_rejects_blank_label() {
        let err = RuleTable::new(vec![
            DeadlineRule::new("Amend pleadings", 7),
            DeadlineRule::new("   ", 3),
        ])
        .unwrap_err();

        assert!(
            err.to_string().contains("#2"),
            "Error should point at the offending rule, got: {}",
            err
        );
    }

    #[test]
    fn test_duplicate_labels_are_allowed() {
        let table = RuleTable::new(vec![
            DeadlineRule::new("Conduct mediation", 30),
            DeadlineRule::new("Conduct mediation", 30),
        ])
        .unwrap();
        assert_eq!(table.len(), 2);
    }
}
