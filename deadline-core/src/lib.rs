//! Core of the trial deadline calculator.
//!
//! This crate provides the two pure components shared by the CLI and server:
//! - `calculator`: applies a [`RuleTable`] to a trial date
//! - `export`: turns a list of (event, date) pairs into .ics, .csv, or .docx bytes

pub mod calculator;
pub mod config;
pub mod entry;
pub mod error;
pub mod export;
pub mod rules;

pub use calculator::{compute, compute_deadlines};
pub use config::{ExportSettings, Settings};
pub use entry::{DeadlineEntry, EntryInput, ExportRequest};
pub use error::{DeadlineError, DeadlineResult};
pub use export::{ExportFormat, ExportedFile, Exporter};
pub use rules::{DeadlineRule, RuleTable};
