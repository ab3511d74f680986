pub mod json_backend;
pub mod memory;

use crate::{
    errors::Result,
    ledger::{DocumentFormat, LedgerState},
};

pub use json_backend::JsonFileStorage;
pub use memory::MemoryStorage;

/// Result of reading the backing store.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Loaded {
        state: LedgerState,
        format: DocumentFormat,
    },
    /// Nothing has been written yet.
    Missing,
    /// The document exists but could not be parsed.
    Corrupt { reason: String },
}

/// Abstraction over persistence backends that hold a single ledger document.
///
/// `save` must write the whole aggregate in one operation and return only once
/// the write is durable; errors are reported as [`crate::LedgerError::Persistence`].
pub trait LedgerStorage: Send + Sync {
    fn load(&self) -> Result<LoadOutcome>;
    fn save(&self, state: &LedgerState) -> Result<()>;
    /// Human-readable location used in logs and CLI output.
    fn describe(&self) -> String;
}

/// Parses raw document text into a load outcome.
pub(crate) fn outcome_from_str(data: &str) -> LoadOutcome {
    match LedgerState::from_json_str(data) {
        Ok((state, format)) => LoadOutcome::Loaded { state, format },
        Err(err) => LoadOutcome::Corrupt {
            reason: err.to_string(),
        },
    }
}
