//! Month-to-date budget evaluation.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::errors::{LedgerError, Result};
use crate::ledger::{
    transaction::normalize_category, Amount, AmountInput, BudgetStatus, LedgerState,
    Notification, Transaction,
};

use super::TransactionService;

/// Default percentage of a limit at which a budget is reported as approaching.
pub const DEFAULT_APPROACHING_PERCENT: u8 = 80;

/// Stateless budgeting utilities that operate over [`LedgerState`] snapshots.
pub struct BudgetService;

impl BudgetService {
    /// Sum of expenses for `category` in the calendar month containing `reference`.
    pub fn month_to_date_spend(
        transactions: &[Transaction],
        category: &str,
        reference: NaiveDate,
    ) -> Amount {
        let category = category.to_lowercase();
        transactions
            .iter()
            .filter(|txn| {
                txn.is_expense()
                    && same_month(txn.date, reference)
                    && txn.category.to_lowercase() == category
            })
            .map(|txn| txn.amount)
            .sum()
    }

    /// Sum of all expenses in the calendar month containing `reference`.
    pub fn total_month_spend(transactions: &[Transaction], reference: NaiveDate) -> Amount {
        transactions
            .iter()
            .filter(|txn| txn.is_expense() && same_month(txn.date, reference))
            .map(|txn| txn.amount)
            .sum()
    }

    /// Builds a budget alert if `txn` pushed its category strictly over the limit.
    ///
    /// `txn` must already be part of `state.transactions`.
    pub fn check(
        state: &LedgerState,
        txn: &Transaction,
        timestamp: NaiveDateTime,
    ) -> Option<Notification> {
        if !txn.is_expense() {
            return None;
        }
        let limit = *state.budgets.get(&txn.category)?;
        let spent = Self::month_to_date_spend(&state.transactions, &txn.category, txn.date);
        (spent > limit)
            .then(|| Notification::budget_alert(&txn.category, txn.amount, limit, spent, timestamp))
    }

    /// Status of every configured budget for the month containing `reference`.
    pub fn status(
        state: &LedgerState,
        reference: NaiveDate,
        approaching_percent: u8,
    ) -> BTreeMap<String, BudgetStatus> {
        let mut spending: BTreeMap<String, Amount> = BTreeMap::new();
        for txn in state
            .transactions
            .iter()
            .filter(|txn| txn.is_expense() && same_month(txn.date, reference))
        {
            *spending.entry(txn.category.to_lowercase()).or_default() += txn.amount;
        }

        state
            .budgets
            .iter()
            .map(|(category, limit)| {
                let spent = spending.get(category).copied().unwrap_or_default();
                (
                    category.clone(),
                    BudgetStatus::new(*limit, spent, approaching_percent),
                )
            })
            .collect()
    }

    /// Validates a limit update, returning the normalized category and amount.
    pub fn validate_limit(category: &str, amount: &AmountInput) -> Result<(String, Amount)> {
        let category = normalize_category(category).map_err(LedgerError::Validation)?;
        let amount = TransactionService::positive_amount(amount)?;
        Ok((category, amount))
    }
}

fn same_month(date: NaiveDate, reference: NaiveDate) -> bool {
    date.year() == reference.year() && date.month() == reference.month()
}
