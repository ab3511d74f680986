#![doc(test(attr(deny(warnings))))]

//! Fintrack Core is the bookkeeping engine of a personal finance tracker:
//! transaction storage, monthly category budgets with overspend alerts,
//! recurring bills, and available-funds accounting.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

pub use crate::core::{Clock, FixedClock, LedgerManager, OpenReport, SystemClock};
pub use errors::{LedgerError, Result};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Fintrack Core tracing initialized.");
    });
}
