//! Ledger domain models and persistence-friendly types.

pub mod amount;
pub mod budget;
pub mod notification;
pub mod recurring;
pub mod state;
pub mod transaction;

pub use amount::{Amount, AmountError, AmountInput};
pub use budget::{BudgetHealth, BudgetStatus, Budgets};
pub use notification::{Notification, NotificationKind};
pub use recurring::RecurringRule;
pub use state::{DocumentFormat, LedgerState};
pub use transaction::{
    display_category, DraftAmount, Transaction, TransactionDraft, TransactionKind,
    TransactionMatcher,
};
