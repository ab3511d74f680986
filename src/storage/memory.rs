use std::sync::{Arc, Mutex, MutexGuard};

use crate::{
    errors::{LedgerError, Result},
    ledger::LedgerState,
};

use super::{outcome_from_str, LedgerStorage, LoadOutcome};

#[derive(Debug, Default)]
struct Inner {
    document: Option<String>,
    saves: usize,
    fail_saves: bool,
}

/// In-process store holding the serialized document.
///
/// Clones share the same document, which lets a test keep a handle while the
/// manager owns the boxed backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with the given raw document text, as if read from disk.
    pub fn with_document(document: impl Into<String>) -> Self {
        let storage = Self::default();
        if let Ok(mut inner) = storage.inner.lock() {
            inner.document = Some(document.into());
        }
        storage
    }

    pub fn save_count(&self) -> usize {
        self.lock().map(|inner| inner.saves).unwrap_or_default()
    }

    pub fn document(&self) -> Option<String> {
        self.lock().ok().and_then(|inner| inner.document.clone())
    }

    /// Makes subsequent saves fail, simulating a full disk.
    pub fn set_fail_saves(&self, fail: bool) {
        if let Ok(mut inner) = self.lock() {
            inner.fail_saves = fail;
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| LedgerError::Persistence("memory storage lock poisoned".into()))
    }
}

impl LedgerStorage for MemoryStorage {
    fn load(&self) -> Result<LoadOutcome> {
        let inner = self.lock()?;
        Ok(match inner.document.as_deref() {
            None => LoadOutcome::Missing,
            Some(data) => outcome_from_str(data),
        })
    }

    fn save(&self, state: &LedgerState) -> Result<()> {
        let mut inner = self.lock()?;
        if inner.fail_saves {
            return Err(LedgerError::Persistence("no space left on device".into()));
        }
        inner.document = Some(state.to_json_string()?);
        inner.saves += 1;
        Ok(())
    }

    fn describe(&self) -> String {
        "in-memory".into()
    }
}
