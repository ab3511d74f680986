#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Mutex;

use chrono::NaiveDate;
use fintrack_core::{
    storage::{JsonFileStorage, MemoryStorage},
    FixedClock, LedgerManager, OpenReport,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// A fresh directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// Manager over an empty in-memory store, with the clock frozen on `today`.
/// The returned storage handle shares the manager's document.
pub fn memory_manager(today: NaiveDate) -> (LedgerManager, MemoryStorage) {
    let storage = MemoryStorage::new();
    let (manager, _) = LedgerManager::load(Box::new(storage.clone()), Box::new(FixedClock::on(today)))
        .expect("load empty ledger");
    (manager, storage)
}

/// Opens (load plus recurring catch-up) the JSON file at `path`.
pub fn open_file(path: &PathBuf, today: NaiveDate) -> (LedgerManager, OpenReport) {
    LedgerManager::open(
        Box::new(JsonFileStorage::new(path.clone())),
        Box::new(FixedClock::on(today)),
    )
    .expect("open ledger file")
}
