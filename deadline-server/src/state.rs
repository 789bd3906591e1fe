use anyhow::Result;
use deadline_core::{Exporter, RuleTable, Settings};
use std::sync::Arc;

/// Shared application state
///
/// Settings are loaded once at startup and never change, so handlers only
/// ever read them.
#[derive(Clone)]
pub struct AppState {
    settings: Arc<Settings>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        AppState {
            settings: Arc::new(settings),
        }
    }

    /// Load settings from the default config path.
    pub fn load() -> Result<Self> {
        let settings = Settings::load_default()?;
        log::info!("Serving {} deadline rules", settings.rules.len());
        Ok(Self::new(settings))
    }

    pub fn rules(&self) -> &RuleTable {
        &self.settings.rules
    }

    pub fn exporter(&self) -> Exporter {
        Exporter::new(self.settings.export.clone())
    }
}
