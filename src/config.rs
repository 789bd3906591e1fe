use anyhow::{Context, Result};
use deadline_core::Settings;
use std::path::Path;

/// Load settings from an explicit path, or from the default location.
///
/// A missing default file means built-in defaults; a missing explicit file
/// is an error.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings> {
    let settings = match explicit {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load_default()?,
    };
    Ok(settings)
}

/// Write a config file with every option commented out.
pub fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {}\n\
            Pass --force to overwrite it.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory at {}", parent.display()))?;
    }

    std::fs::write(path, Settings::default_file_contents())
        .with_context(|| format!("Failed to write config file at {}", path.display()))?;

    Ok(())
}
