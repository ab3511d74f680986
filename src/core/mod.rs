//! Ledger orchestration: clock, stateless services and the owning facade.

pub mod clock;
pub mod ledger_manager;
pub mod services;
pub mod utils;

pub use clock::{Clock, FixedClock, SystemClock};
pub use ledger_manager::{LedgerManager, OpenReport};
