//! Deadline entries and export requests.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::DeadlineResult;

/// Date format used on the wire and in JSON (e.g. 2025-06-01)
pub const WIRE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse wire date text (YYYY-MM-DD), ignoring surrounding whitespace.
///
/// Only an unsigned four-digit year is accepted; chrono's `%Y` alone would
/// also take `+2025` or `-0001`.
pub fn parse_wire_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if !has_wire_date_shape(text) {
        return None;
    }
    NaiveDate::parse_from_str(text, WIRE_DATE_FORMAT).ok()
}

/// `DDDD-DD-DD` with ASCII digits
fn has_wire_date_shape(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// A computed deadline: one rule applied to a trial date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadlineEntry {
    pub event: String,
    #[serde(with = "wire_date")]
    pub date: NaiveDate,
}

impl DeadlineEntry {
    pub fn new(event: impl Into<String>, date: NaiveDate) -> Self {
        DeadlineEntry {
            event: event.into(),
            date,
        }
    }
}

/// An entry as submitted for export: event text plus raw date text.
///
/// The date may be anything the user typed; backends drop entries whose
/// date does not parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryInput {
    #[serde(default)]
    pub event: String,
    #[serde(default)]
    pub date: String,
}

impl EntryInput {
    pub fn new(event: impl Into<String>, date: impl Into<String>) -> Self {
        EntryInput {
            event: event.into(),
            date: date.into(),
        }
    }

    /// Parsed date, if the date text is valid YYYY-MM-DD
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_wire_date(&self.date)
    }

    /// True when both event and date are empty after trimming
    pub fn is_blank(&self) -> bool {
        self.event.trim().is_empty() && self.date.trim().is_empty()
    }
}

impl From<DeadlineEntry> for EntryInput {
    fn from(entry: DeadlineEntry) -> Self {
        EntryInput {
            event: entry.event,
            date: entry.date.format(WIRE_DATE_FORMAT).to_string(),
        }
    }
}

impl From<&DeadlineEntry> for EntryInput {
    fn from(entry: &DeadlineEntry) -> Self {
        entry.clone().into()
    }
}

/// Parse a JSON array of `{event, date}` objects, the shape returned by the
/// calculator endpoint.
pub fn entries_from_json(text: &str) -> DeadlineResult<Vec<EntryInput>> {
    Ok(serde_json::from_str(text)?)
}

/// Zip parallel event/date lists into entries, as submitted by a form with
/// repeated `event` and `date` fields. Unmatched trailing values are ignored.
pub fn entries_from_pairs<E, D>(events: E, dates: D) -> Vec<EntryInput>
where
    E: IntoIterator,
    E::Item: Into<String>,
    D: IntoIterator,
    D::Item: Into<String>,
{
    events
        .into_iter()
        .zip(dates)
        .map(|(event, date)| EntryInput::new(event, date))
        .collect()
}

/// Immutable snapshot of everything a backend needs to produce a file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportRequest {
    client_name: String,
    trial_date: Option<String>,
    entries: Vec<EntryInput>,
}

impl ExportRequest {
    /// Create a request; the client name is trimmed.
    pub fn new(client_name: impl AsRef<str>, entries: Vec<EntryInput>) -> Self {
        ExportRequest {
            client_name: client_name.as_ref().trim().to_string(),
            trial_date: None,
            entries,
        }
    }

    /// Attach the trial date text shown in the document header.
    pub fn with_trial_date(mut self, trial_date: impl AsRef<str>) -> Self {
        let trial_date = trial_date.as_ref().trim();
        self.trial_date = (!trial_date.is_empty()).then(|| trial_date.to_string());
        self
    }

    /// Request built straight from calculator output.
    pub fn from_deadlines(client_name: impl AsRef<str>, deadlines: &[DeadlineEntry]) -> Self {
        Self::new(client_name, deadlines.iter().map(EntryInput::from).collect())
    }

    pub fn client_name(&self) -> &str {
        &self.client_name
    }

    pub fn trial_date(&self) -> Option<&str> {
        self.trial_date.as_deref()
    }

    pub fn entries(&self) -> &[EntryInput] {
        &self.entries
    }

    /// Entries whose date would be dropped by every backend.
    ///
    /// Lets a caller that wants strict validation reject the request up front.
    pub fn invalid_entries(&self) -> impl Iterator<Item = (usize, &EntryInput)> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.parsed_date().is_none())
    }

    /// Entries with a valid date, paired with their position in the request.
    pub(crate) fn dated_entries(&self) -> impl Iterator<Item = (usize, &EntryInput, NaiveDate)> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| entry.parsed_date().map(|date| (index, entry, date)))
    }

    /// Subject line for an event: "<Client> – <Event>" or just the event.
    pub fn subject_for(&self, event: &str) -> String {
        if self.client_name.is_empty() {
            event.to_string()
        } else {
            format!("{} \u{2013} {}", self.client_name, event)
        }
    }
}

mod wire_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{WIRE_DATE_FORMAT, parse_wire_date};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(WIRE_DATE_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse_wire_date(&text).ok_or_else(|| {
            serde::de::Error::custom(format!("invalid date '{}', expected YYYY-MM-DD", text))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wire_date_rejects_other_formats() {
        assert_eq!(
            parse_wire_date(" 2025-06-01 "),
            NaiveDate::from_ymd_opt(2025, 6, 1)
        );
        assert_eq!(parse_wire_date("06/01/2025"), None);
        assert_eq!(parse_wire_date("2025-02-30"), None);
        assert_eq!(parse_wire_date(""), None);
    }

    #[test]
    fn test_parse_wire_date_requires_four_digit_year() {
        assert_eq!(parse_wire_date("-0001-06-01"), None);
        assert_eq!(parse_wire_date("+2025-06-01"), None);
        assert_eq!(parse_wire_date("12025-06-01"), None);
        assert_eq!(parse_wire_date("2025-6-1"), None);
        assert_eq!(parse_wire_date("0001-06-01"), NaiveDate::from_ymd_opt(1, 6, 1));
    }

    #[test]
    fn test_deadline_entry_serializes_with_wire_date() {
        let entry = DeadlineEntry::new("Amend pleadings", NaiveDate::from_ymd_opt(2025, 11, 24).unwrap());
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"event":"Amend pleadings","date":"2025-11-24"}"#);

        let back: DeadlineEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_request_trims_client_name() {
        let request = ExportRequest::new("  Smith \n", vec![]);
        assert_eq!(request.client_name(), "Smith");
        assert_eq!(request.subject_for("Mediation"), "Smith \u{2013} Mediation");

        let anonymous = ExportRequest::new("   ", vec![]);
        assert_eq!(anonymous.subject_for("Mediation"), "Mediation");
    }

    #[test]
    fn test_with_trial_date_ignores_blank_text() {
        let request = ExportRequest::new("", vec![]).with_trial_date("  ");
        assert_eq!(request.trial_date(), None);

        let request = ExportRequest::new("", vec![]).with_trial_date(" 2025-12-01 ");
        assert_eq!(request.trial_date(), Some("2025-12-01"));
    }

    #[test]
    fn test_entries_from_pairs_ignores_unmatched_values() {
        let entries = entries_from_pairs(vec!["A", "B", "C"], vec!["2025-01-01", "2025-01-02"]);
        assert_eq!(
            entries,
            vec![
                EntryInput::new("A", "2025-01-01"),
                EntryInput::new("B", "2025-01-02"),
            ]
        );
    }

    #[test]
    fn test_entries_from_json_accepts_missing_fields() {
        let entries = entries_from_json(r#"[{"event":"Mediation"},{"date":"2025-06-01"}]"#).unwrap();
        assert_eq!(entries[0], EntryInput::new("Mediation", ""));
        assert_eq!(entries[1], EntryInput::new("", "2025-06-01"));
    }

    #[test]
    fn test_invalid_entries_reports_positions() {
        let request = ExportRequest::new(
            "",
            vec![
                EntryInput::new("Good", "2025-06-01"),
                EntryInput::new("Bad", "tomorrow"),
                EntryInput::new("Empty", ""),
            ],
        );
        let positions: Vec<usize> = request.invalid_entries().map(|(i, _)| i).collect();
        assert_eq!(positions, vec![1, 2]);
    }
}
