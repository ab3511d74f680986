//! Available-funds accounting.
//!
//! Pending recurring expenses that are already due are deducted before the
//! scheduler materializes them; pending recurring income is not added. The
//! asymmetry is intentional: funds that are earmarked should never look spendable.

use chrono::NaiveDate;

use crate::ledger::{Amount, LedgerState, TransactionKind};

pub struct FundsService;

impl FundsService {
    pub fn total(state: &LedgerState, kind: TransactionKind) -> Amount {
        state
            .transactions
            .iter()
            .filter(|txn| txn.kind == kind)
            .map(|txn| txn.amount)
            .sum()
    }

    /// Sum of recurring expense rules due on `today`.
    ///
    /// Rules with a non-positive amount never fire, so they are not counted.
    pub fn pending_obligations(state: &LedgerState, today: NaiveDate) -> Amount {
        state
            .recurring
            .iter()
            .filter(|rule| rule.is_expense() && rule.amount.is_positive() && rule.is_due(today))
            .map(|rule| rule.amount)
            .sum()
    }

    pub fn available(state: &LedgerState, today: NaiveDate) -> Amount {
        Self::total(state, TransactionKind::Income)
            - Self::total(state, TransactionKind::Expense)
            - Self::pending_obligations(state, today)
    }
}
