use anyhow::{Context, Result};
use deadline_core::entry::entries_from_json;
use deadline_core::export::csv::read_entries;
use deadline_core::{
    EntryInput, ExportFormat, ExportRequest, Exporter, Settings, compute_deadlines,
};
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct ExportArgs {
    pub format: ExportFormat,
    pub client: String,
    pub trial_date: Option<String>,
    pub entries: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub stdout: bool,
}

pub fn run(args: ExportArgs, settings: &Settings) -> Result<()> {
    let entries = match (&args.entries, &args.trial_date) {
        (Some(path), _) => load_entries(path)?,
        (None, Some(trial_date)) => {
            let deadlines = compute_deadlines(trial_date, &settings.rules);
            if deadlines.is_empty() {
                log::warn!(
                    "No deadlines for trial date '{}' (expected YYYY-MM-DD); exporting an empty file",
                    trial_date
                );
            }
            deadlines.into_iter().map(EntryInput::from).collect()
        }
        (None, None) => anyhow::bail!(
            "Nothing to export.\n\
            Pass --trial-date to compute deadlines, or --entries with a JSON or CSV file."
        ),
    };

    let mut request = ExportRequest::new(&args.client, entries);
    if let Some(trial_date) = &args.trial_date {
        request = request.with_trial_date(trial_date);
    }

    let exporter = Exporter::new(settings.export.clone());
    let file = exporter.export(args.format, &request)?;

    if file.skipped > 0 {
        log::warn!(
            "Skipped {} entries without a valid YYYY-MM-DD date",
            file.skipped
        );
    }

    if args.stdout {
        std::io::stdout()
            .write_all(&file.bytes)
            .context("Failed to write export to stdout")?;
        return Ok(());
    }

    let dir = args.output.unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create output directory at {}", dir.display()))?;

    let path = dir.join(&file.filename);
    std::fs::write(&path, &file.bytes)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    let written = request.entries().len() - file.skipped;
    println!(
        "Wrote {} {} to {}",
        written,
        if written == 1 { "deadline" } else { "deadlines" },
        path.display()
    );

    Ok(())
}

/// Read an entry list from a JSON array (`[{event, date}]`) or an exported CSV.
fn load_entries(path: &Path) -> Result<Vec<EntryInput>> {
    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    if is_csv {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read entries file at {}", path.display()))?;
        let entries = read_entries(&bytes)
            .with_context(|| format!("Failed to parse entries CSV at {}", path.display()))?;
        return Ok(entries.into_iter().map(EntryInput::from).collect());
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read entries file at {}", path.display()))?;
    entries_from_json(&contents)
        .with_context(|| format!("Failed to parse entries JSON at {}", path.display()))
}
