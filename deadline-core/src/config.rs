//! Operator settings: the rule table plus export metadata.
//!
//! Settings live at ~/.config/deadline-calc/config.toml. A missing file means
//! the built-in rule table and export defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DeadlineError, DeadlineResult};
use crate::rules::{DeadlineRule, RuleTable};

pub const DEFAULT_PRODUCT_ID: &str = "-//Freelance Annie//Texas Deadline Calculator//EN";
pub const DEFAULT_UID_DOMAIN: &str = "freelanceannie";
pub const DEFAULT_PLACEHOLDER_TIME: &str = "09:30 AM";
pub const DEFAULT_DOCUMENT_TITLE: &str = "Legal Deadlines Summary";

fn default_product_id() -> String {
    DEFAULT_PRODUCT_ID.to_string()
}

fn default_uid_domain() -> String {
    DEFAULT_UID_DOMAIN.to_string()
}

fn default_placeholder_time() -> String {
    DEFAULT_PLACEHOLDER_TIME.to_string()
}

fn default_document_title() -> String {
    DEFAULT_DOCUMENT_TITLE.to_string()
}

/// Metadata stamped into exported files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSettings {
    /// PRODID line of the calendar
    #[serde(default = "default_product_id")]
    pub product_id: String,

    /// Suffix after `@` in every event UID
    #[serde(default = "default_uid_domain")]
    pub uid_domain: String,

    /// Start/end time written to every spreadsheet row
    #[serde(default = "default_placeholder_time")]
    pub placeholder_time: String,

    /// Heading of the generated document
    #[serde(default = "default_document_title")]
    pub document_title: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        ExportSettings {
            product_id: default_product_id(),
            uid_domain: default_uid_domain(),
            placeholder_time: default_placeholder_time(),
            document_title: default_document_title(),
        }
    }
}

#[derive(Deserialize)]
struct RawSettings {
    #[serde(default)]
    export: ExportSettings,

    rules: Option<Vec<DeadlineRule>>,
}

/// Validated settings: the rule table and export metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub rules: RuleTable,
    pub export: ExportSettings,
}

impl Settings {
    pub fn config_path() -> DeadlineResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| DeadlineError::Config("Could not determine config directory".into()))?
            .join("deadline-calc");

        Ok(config_dir.join("config.toml"))
    }

    /// Load settings from ~/.config/deadline-calc/config.toml, falling back
    /// to defaults when the file does not exist.
    pub fn load_default() -> DeadlineResult<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            log::debug!("No config at {}, using built-in rules", path.display());
            return Ok(Settings::default());
        }
        Self::load_from(&path)
    }

    /// Load settings from an explicit file, which must exist.
    pub fn load_from(path: &Path) -> DeadlineResult<Self> {
        if !path.exists() {
            return Err(DeadlineError::Config(format!(
                "Config file not found at {}",
                path.display()
            )));
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            DeadlineError::Config(format!("Could not read config file at {}: {e}", path.display()))
        })?;

        let settings = Self::from_toml_str(&contents).map_err(|e| match e {
            DeadlineError::Config(message) => {
                DeadlineError::Config(format!("{} ({})", message, path.display()))
            }
            other => other,
        })?;

        log::debug!(
            "Loaded {} deadline rules from {}",
            settings.rules.len(),
            path.display()
        );

        Ok(settings)
    }

    /// Parse settings from TOML. Absent sections fall back to defaults.
    pub fn from_toml_str(contents: &str) -> DeadlineResult<Self> {
        let raw: RawSettings = toml::from_str(contents)?;

        let rules = match raw.rules {
            Some(rules) => RuleTable::new(rules)?,
            None => RuleTable::default(),
        };

        Ok(Settings {
            rules,
            export: raw.export,
        })
    }

    /// Default config file contents with every option commented out.
    pub fn default_file_contents() -> String {
        let mut contents = format!(
            "\
# Deadline calculator configuration

[export]
# product_id = \"{DEFAULT_PRODUCT_ID}\"
# uid_domain = \"{DEFAULT_UID_DOMAIN}\"
# placeholder_time = \"{DEFAULT_PLACEHOLDER_TIME}\"
# document_title = \"{DEFAULT_DOCUMENT_TITLE}\"

# Deadline rules in display order (days BEFORE trial).
# Uncomment and edit to replace the built-in table.
"
        );

        for rule in &RuleTable::default() {
            contents.push_str(&format!(
                "\n# [[rules]]\n# label = \"{}\"\n# offset_days = {}\n",
                rule.label, rule.offset_days
            ));
        }

        contents
    }
}
