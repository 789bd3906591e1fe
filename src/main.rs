mod commands;
mod config;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use deadline_core::ExportFormat;
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};
use std::path::PathBuf;

use commands::export::ExportArgs;

#[derive(Parser)]
#[command(name = "deadline-cli")]
#[command(about = "Compute trial filing deadlines and export them to calendars, spreadsheets, or documents")]
struct Cli {
    /// Config file (defaults to ~/.config/deadline-calc/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Show debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the deadline rules in use
    Rules,
    /// Compute deadlines for a trial date
    Calculate {
        /// Trial date (YYYY-MM-DD)
        trial_date: String,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Export deadlines as .ics, .csv, or .docx
    Export {
        /// Output format: ics, csv, or docx
        format: ExportFormat,

        /// Client name used in subjects and the filename
        #[arg(short, long, default_value = "")]
        client: String,

        /// Trial date (YYYY-MM-DD); deadlines are computed from it unless --entries is given
        #[arg(short, long)]
        trial_date: Option<String>,

        /// Edited entries: JSON array of {event, date} or a CSV in the exported layout
        #[arg(short, long)]
        entries: Option<PathBuf>,

        /// Directory to write the file to (defaults to the current directory)
        #[arg(short, long, conflicts_with = "stdout")]
        output: Option<PathBuf>,

        /// Write the file to stdout instead
        #[arg(long)]
        stdout: bool,
    },
    /// Write a default config file
    InitConfig {
        /// Where to write it (defaults to ~/.config/deadline-calc/config.toml)
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    let settings = || config::load_settings(cli.config.as_deref());

    match cli.command {
        Commands::Rules => commands::rules::run(&settings()?.rules),
        Commands::Calculate { trial_date, json } => {
            commands::calculate::run(&trial_date, &settings()?.rules, json)
        }
        Commands::Export {
            format,
            client,
            trial_date,
            entries,
            output,
            stdout,
        } => commands::export::run(
            ExportArgs {
                format,
                client,
                trial_date,
                entries,
                output,
                stdout,
            },
            &settings()?,
        ),
        Commands::InitConfig { path, force } => commands::init_config::run(path, force),
    }
}
