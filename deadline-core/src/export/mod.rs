//! Export backends: iCalendar, CSV, and Word document.
//!
//! Every backend takes an [`ExportRequest`] snapshot, drops entries whose date
//! does not parse, and returns the file bytes with a suggested filename.

pub mod csv;
pub mod docx;
pub mod ics;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ExportSettings;
use crate::entry::ExportRequest;
use crate::error::DeadlineResult;

/// Basename used when the client name is empty
pub const DEFAULT_BASENAME: &str = "Deadlines";

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Ics,
    Csv,
    Docx,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Ics => "ics",
            ExportFormat::Csv => "csv",
            ExportFormat::Docx => "docx",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Ics => "text/calendar",
            ExportFormat::Csv => "text/csv",
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ics" | "ical" | "calendar" => Ok(ExportFormat::Ics),
            "csv" | "spreadsheet" => Ok(ExportFormat::Csv),
            "docx" | "doc" | "document" | "word" => Ok(ExportFormat::Docx),
            other => Err(format!(
                "Unknown export format '{}'. Expected ics, csv, or docx",
                other
            )),
        }
    }
}

/// A finished export, ready to hand to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub content_type: &'static str,
    /// Entries left out because their date did not parse
    pub skipped: usize,
}

impl ExportedFile {
    fn new(format: ExportFormat, request: &ExportRequest, bytes: Vec<u8>, skipped: usize) -> Self {
        if skipped > 0 {
            log::debug!(
                "{} export for {:?}: skipped {} of {} entries with unparsable dates",
                format,
                request.client_name(),
                skipped,
                request.entries().len()
            );
        }

        ExportedFile {
            bytes,
            filename: suggested_filename(request.client_name(), format),
            content_type: format.content_type(),
            skipped,
        }
    }
}

/// "<Client>-deadlines.<ext>", or "Deadlines-deadlines.<ext>" without a client.
pub fn suggested_filename(client_name: &str, format: ExportFormat) -> String {
    let client_name = client_name.trim();
    let base = if client_name.is_empty() {
        DEFAULT_BASENAME
    } else {
        client_name
    };
    format!("{}-deadlines.{}", base, format.extension())
}

/// Produces export files with a fixed set of export settings.
///
/// Stateless apart from the read-only settings, so one instance can serve
/// any number of concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct Exporter {
    settings: ExportSettings,
    stamp: Option<DateTime<Utc>>,
}

impl Exporter {
    pub fn new(settings: ExportSettings) -> Self {
        Exporter {
            settings,
            stamp: None,
        }
    }

    /// Pin the DTSTAMP written into calendars (defaults to the current time).
    pub fn stamped_at(mut self, stamp: DateTime<Utc>) -> Self {
        self.stamp = Some(stamp);
        self
    }

    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    /// Build the .ics calendar file.
    pub fn calendar(&self, request: &ExportRequest) -> DeadlineResult<ExportedFile> {
        let stamp = self.stamp.unwrap_or_else(Utc::now);
        let (content, skipped) = ics::generate_calendar(request, &self.settings, stamp);
        Ok(ExportedFile::new(
            ExportFormat::Ics,
            request,
            content.into_bytes(),
            skipped,
        ))
    }

    /// Build the spreadsheet-importable .csv file.
    pub fn spreadsheet(&self, request: &ExportRequest) -> DeadlineResult<ExportedFile> {
        let (bytes, skipped) = csv::generate_csv(request, &self.settings)?;
        Ok(ExportedFile::new(ExportFormat::Csv, request, bytes, skipped))
    }

    /// Build the .docx summary document.
    pub fn document(&self, request: &ExportRequest) -> DeadlineResult<ExportedFile> {
        let (bytes, skipped) = docx::generate_docx(request, &self.settings)?;
        Ok(ExportedFile::new(ExportFormat::Docx, request, bytes, skipped))
    }

    pub fn export(&self, format: ExportFormat, request: &ExportRequest) -> DeadlineResult<ExportedFile> {
        match format {
            ExportFormat::Ics => self.calendar(request),
            ExportFormat::Csv => self.spreadsheet(request),
            ExportFormat::Docx => self.document(request),
        }
    }
}
