//! Spreadsheet export in the calendar-import CSV layout
//! (Subject, Start Date, Start Time, End Date, End Time, Description).

use chrono::NaiveDate;

use crate::config::ExportSettings;
use crate::entry::{DeadlineEntry, ExportRequest};
use crate::error::{DeadlineError, DeadlineResult};

pub const HEADER: [&str; 6] = [
    "Subject",
    "Start Date",
    "Start Time",
    "End Date",
    "End Time",
    "Description",
];

/// US date format used in the date columns (e.g. 06/01/2025)
pub const US_DATE_FORMAT: &str = "%m/%d/%Y";

const DESCRIPTION_SUFFIX: &str = " Deadline";

/// Write the header plus one row per entry with a valid date.
///
/// Returns the CSV bytes and the number of entries skipped.
pub fn generate_csv(request: &ExportRequest, settings: &ExportSettings) -> DeadlineResult<(Vec<u8>, usize)> {
    let mut writer = ::csv::WriterBuilder::new()
        .terminator(::csv::Terminator::CRLF)
        .from_writer(Vec::new());

    writer.write_record(HEADER)?;

    let mut written = 0;
    for (_, entry, date) in request.dated_entries() {
        let date_mdy = date.format(US_DATE_FORMAT).to_string();
        let subject = request.subject_for(&entry.event);
        let description = format!("{}{}", entry.event, DESCRIPTION_SUFFIX);

        writer.write_record([
            subject.as_str(),
            date_mdy.as_str(),
            settings.placeholder_time.as_str(),
            date_mdy.as_str(),
            settings.placeholder_time.as_str(),
            description.as_str(),
        ])?;
        written += 1;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| DeadlineError::Io(e.into_error()))?;

    Ok((bytes, request.entries().len() - written))
}

/// Read entries back from a file in the exported layout.
///
/// The event comes from the Description column (minus the " Deadline"
/// suffix) so the client prefix of the Subject does not leak into it; rows
/// without a parsable Start Date are skipped like on export.
pub fn read_entries(bytes: &[u8]) -> DeadlineResult<Vec<DeadlineEntry>> {
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers = reader.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| DeadlineError::CsvParse(format!("Missing '{}' column", name)))
    };
    let subject_col = column("Subject")?;
    let date_col = column("Start Date")?;
    let description_col = column("Description").ok();

    let mut entries = Vec::new();
    for record in reader.records() {
        let record = record?;

        let Some(date) = record
            .get(date_col)
            .and_then(|d| NaiveDate::parse_from_str(d.trim(), US_DATE_FORMAT).ok())
        else {
            continue;
        };

        let event = description_col
            .and_then(|col| record.get(col))
            .and_then(|d| d.strip_suffix(DESCRIPTION_SUFFIX))
            .or_else(|| record.get(subject_col))
            .unwrap_or_default();

        entries.push(DeadlineEntry::new(event, date));
    }

    Ok(entries)
}
