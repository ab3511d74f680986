use dirs::home_dir;
use std::{env, path::PathBuf};

const DEFAULT_DIR_NAME: &str = ".fintrack";
const LEDGER_FILE: &str = "transactions.json";
const CONFIG_FILE: &str = "config.json";

/// Returns the application data directory: `$FINTRACK_HOME`, else `~/.fintrack`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("FINTRACK_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Default location of the ledger document inside `base`.
pub fn ledger_file_in(base: &std::path::Path) -> PathBuf {
    base.join(LEDGER_FILE)
}

pub fn config_file_in(base: &std::path::Path) -> PathBuf {
    base.join(CONFIG_FILE)
}
