use anyhow::Result;
use deadline_core::Settings;
use std::path::PathBuf;

use crate::config;

pub fn run(path: Option<PathBuf>, force: bool) -> Result<()> {
    let path = match path {
        Some(path) => path,
        None => Settings::config_path()?,
    };

    config::write_default_config(&path, force)?;

    println!("Wrote default config to {}", path.display());
    println!("Uncomment the [[rules]] entries to customize the deadline table.");

    Ok(())
}
