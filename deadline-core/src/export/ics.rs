//! iCalendar (RFC 5545) generation.
//!
//! Lines are assembled directly rather than through a calendar builder so the
//! output is byte-exact: fixed property order, CRLF after every line, and no
//! line folding.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::config::ExportSettings;
use crate::entry::{EntryInput, ExportRequest};

const CRLF: &str = "\r\n";

/// Generate calendar text for every entry with a valid date.
///
/// Returns the document and the number of entries skipped.
pub fn generate_calendar(
    request: &ExportRequest,
    settings: &ExportSettings,
    stamp: DateTime<Utc>,
) -> (String, usize) {
    let dtstamp = stamp.format("%Y%m%dT%H%M%SZ").to_string();

    let mut lines = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        "CALSCALE:GREGORIAN".to_string(),
        format!("PRODID:{}", settings.product_id),
    ];

    let mut written = 0;
    for (index, entry, date) in request.dated_entries() {
        let ymd = date.format("%Y%m%d").to_string();
        let summary = request.subject_for(&entry.event);

        lines.extend([
            "BEGIN:VEVENT".to_string(),
            format!("UID:{}", event_uid(index, entry, date, &settings.uid_domain)),
            format!("DTSTAMP:{}", dtstamp),
            format!("SUMMARY:{}", escape_text(&summary)),
            // All-day event: DTEND is the same day as DTSTART
            format!("DTSTART;VALUE=DATE:{}", ymd),
            format!("DTEND;VALUE=DATE:{}", ymd),
            "END:VEVENT".to_string(),
        ]);
        written += 1;
    }

    lines.push("END:VCALENDAR".to_string());

    let mut output = lines.join(CRLF);
    output.push_str(CRLF);

    (output, request.entries().len() - written)
}

/// Unique, deterministic event UID: `<YYYYMMDD>-<index>-<label hash>@<domain>`.
///
/// The index is the entry's position in the request, so two entries with the
/// same text and date still get distinct UIDs.
pub fn event_uid(index: usize, entry: &EntryInput, date: NaiveDate, domain: &str) -> String {
    let label_hash = Uuid::new_v5(&Uuid::NAMESPACE_OID, entry.event.as_bytes())
        .simple()
        .to_string();
    format!(
        "{}-{}-{}@{}",
        date.format("%Y%m%d"),
        index,
        &label_hash[..16],
        domain
    )
}

/// Escape a TEXT value (RFC 5545 §3.3.11).
///
/// Backslash goes first so the escapes added afterwards are not doubled.
/// CRLF and bare CR (form textareas submit both) become `\n` like LF.
pub fn escape_text(value: &str) -> String {
    value
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace('\n', "\\n")
}

/// Inverse of [`escape_text`], except that line endings come back as LF.
///
/// Accepts `\N` as a newline as RFC 5545 allows; an unknown or trailing
/// escape is kept literally.
pub fn unescape_text(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => result.push('\\'),
            Some(';') => result.push(';'),
            Some(',') => result.push(','),
            Some('n') | Some('N') => result.push('\n'),
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
            None => result.push('\\'),
        }
    }

    result
}
