use std::{
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use chrono::Local;
use tracing::{debug, warn};

use crate::{errors::Result, ledger::LedgerState};

use super::{outcome_from_str, LedgerStorage, LoadOutcome};

const TMP_SUFFIX: &str = "tmp";
const CORRUPT_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Stores the ledger as one pretty-printed JSON document.
///
/// Writes go to a sibling temp file that is renamed over the target, so a
/// failed save leaves the previous document intact.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Copies an unreadable document aside so the next save cannot destroy it.
    fn quarantine(&self) -> Option<PathBuf> {
        let stem = self
            .path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("ledger");
        let timestamp = Local::now().format(CORRUPT_TIMESTAMP_FORMAT);
        let target = self
            .path
            .with_file_name(format!("{stem}.corrupt-{timestamp}.json"));
        match fs::copy(&self.path, &target) {
            Ok(_) => Some(target),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "could not preserve corrupt ledger");
                None
            }
        }
    }
}

impl LedgerStorage for JsonFileStorage {
    fn load(&self) -> Result<LoadOutcome> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(LoadOutcome::Missing),
            Err(err) if err.kind() == ErrorKind::InvalidData => {
                self.quarantine();
                return Ok(LoadOutcome::Corrupt {
                    reason: err.to_string(),
                });
            }
            Err(err) => return Err(err.into()),
        };

        let outcome = outcome_from_str(&data);
        if let LoadOutcome::Corrupt { reason } = &outcome {
            let preserved = self.quarantine();
            warn!(
                path = %self.path.display(),
                preserved = ?preserved,
                %reason,
                "ledger document is corrupt"
            );
        }
        Ok(outcome)
    }

    fn save(&self, state: &LedgerState) -> Result<()> {
        save_state_to_path(state, &self.path)?;
        debug!(path = %self.path.display(), "ledger saved");
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Serializes the whole aggregate and atomically replaces `path`.
pub fn save_state_to_path(state: &LedgerState, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = state.to_json_string()?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

pub fn load_state_from_path(path: &Path) -> Result<LedgerState> {
    let data = fs::read_to_string(path)?;
    let (state, _) = LedgerState::from_json_str(&data)?;
    Ok(state)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    Ok(())
}
