//! Validation and lookup helpers for ledger transactions.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::errors::{LedgerError, Result};
use crate::ledger::{
    transaction::{normalize_category, parse_date},
    Amount, AmountInput, LedgerState, Transaction, TransactionDraft, TransactionKind,
    TransactionMatcher,
};

/// Largest amount a single record may carry, in whole currency units.
pub const MAX_AMOUNT_UNITS: i64 = 1_000_000_000_000;

/// Amounts are kept to cents. With the unit cap this bounds every stored
/// value to 15 significant digits, which survive the JSON number encoding.
pub const MAX_DECIMAL_PLACES: u32 = 2;

/// Stateless helpers that turn raw input into validated [`Transaction`]s.
pub struct TransactionService;

impl TransactionService {
    /// Validates loosely-typed input. `date` defaults to `today` when absent or blank.
    pub fn validate(
        amount: AmountInput,
        category: &str,
        kind: &str,
        date: Option<&str>,
        today: NaiveDate,
    ) -> Result<Transaction> {
        let amount = Self::positive_amount(&amount)?;
        let kind = TransactionKind::from_str(kind).map_err(LedgerError::Validation)?;
        let date = match date.map(str::trim).filter(|raw| !raw.is_empty()) {
            Some(raw) => parse_date(raw).map_err(LedgerError::Validation)?,
            None => today,
        };
        Self::build(amount, category, kind, date)
    }

    /// Validates a candidate record exactly as manual input would be.
    pub fn validate_draft(draft: &TransactionDraft, today: NaiveDate) -> Result<Transaction> {
        Self::validate(
            draft.amount.clone().into(),
            &draft.category,
            &draft.kind,
            draft.date.as_deref(),
            today,
        )
    }

    /// Builds a transaction from typed parts, enforcing the record invariants.
    pub fn build(
        amount: Amount,
        category: &str,
        kind: TransactionKind,
        date: NaiveDate,
    ) -> Result<Transaction> {
        if !amount.is_positive() {
            return Err(LedgerError::validation(format!(
                "amount must be greater than zero, got {}",
                amount.value()
            )));
        }
        let category = normalize_category(category).map_err(LedgerError::Validation)?;
        Ok(Transaction::new(amount, category, kind, date))
    }

    pub fn positive_amount(input: &AmountInput) -> Result<Amount> {
        let amount = input
            .resolve()
            .map_err(|err| LedgerError::validation(format!("invalid amount: {err}")))?;
        if !amount.is_positive() {
            return Err(LedgerError::validation(format!(
                "amount must be greater than zero, got {}",
                amount.value()
            )));
        }
        if amount.value() > Decimal::from(MAX_AMOUNT_UNITS) {
            return Err(LedgerError::validation(format!(
                "amount must not exceed {MAX_AMOUNT_UNITS}, got {}",
                amount.value()
            )));
        }
        if amount.decimal_places() > MAX_DECIMAL_PLACES {
            return Err(LedgerError::validation(format!(
                "amount has more than {MAX_DECIMAL_PLACES} decimal places: {}",
                amount.value()
            )));
        }
        Ok(amount)
    }

    /// Index of the first transaction matching the visible fields.
    pub fn position_of(state: &LedgerState, matcher: &TransactionMatcher) -> Option<usize> {
        state.transactions.iter().position(|txn| txn.matches(matcher))
    }

    /// Removes the first structural match.
    pub fn remove_matching(
        state: &mut LedgerState,
        matcher: &TransactionMatcher,
    ) -> Result<Transaction> {
        let index = Self::position_of(state, matcher).ok_or_else(|| {
            LedgerError::not_found(format!(
                "no {} of {} in `{}` on {}",
                matcher.kind, matcher.amount, matcher.category, matcher.date
            ))
        })?;
        Ok(state.transactions.remove(index))
    }

    pub fn remove_by_id(state: &mut LedgerState, id: Uuid) -> Result<Transaction> {
        let index = state
            .transactions
            .iter()
            .position(|txn| txn.id == id)
            .ok_or_else(|| LedgerError::not_found(format!("transaction {id}")))?;
        Ok(state.transactions.remove(index))
    }

    /// The `count` most recent transactions by date; later insertions win ties.
    pub fn recent(state: &LedgerState, count: usize) -> Vec<&Transaction> {
        let mut ordered: Vec<(usize, &Transaction)> = state.transactions.iter().enumerate().collect();
        ordered.sort_by(|(ia, a), (ib, b)| b.date.cmp(&a.date).then(ib.cmp(ia)));
        ordered.into_iter().take(count).map(|(_, txn)| txn).collect()
    }
}
