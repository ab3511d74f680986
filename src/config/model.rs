use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::services::DEFAULT_APPROACHING_PERCENT;
use crate::core::utils::ledger_file_in;

/// User-configurable preferences. Every field has a default so partial files load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Custom ledger document. Defaults to `<home>/transactions.json`.
    pub ledger_file: Option<PathBuf>,
    #[serde(default = "Config::default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "Config::default_approaching_threshold")]
    pub approaching_threshold_percent: u8,
    #[serde(default = "Config::default_recent_count")]
    pub recent_count: usize,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ledger_file: None,
            currency_symbol: Self::default_currency_symbol(),
            approaching_threshold_percent: Self::default_approaching_threshold(),
            recent_count: Self::default_recent_count(),
            ui_color_enabled: Self::default_ui_color_enabled(),
        }
    }
}

impl Config {
    pub fn default_currency_symbol() -> String {
        "$".into()
    }

    pub fn default_approaching_threshold() -> u8 {
        DEFAULT_APPROACHING_PERCENT
    }

    pub fn default_recent_count() -> usize {
        5
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    /// The ledger document to open, relative paths resolved against `base`.
    pub fn resolve_ledger_file(&self, base: &Path) -> PathBuf {
        match &self.ledger_file {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => base.join(path),
            None => ledger_file_in(base),
        }
    }
}
