//! Validation and due-date helpers for recurring rules.

use std::str::FromStr;

use chrono::NaiveDate;

use crate::errors::{LedgerError, Result};
use crate::ledger::{
    transaction::normalize_category, AmountInput, LedgerState, RecurringRule, Transaction,
    TransactionKind,
};

use super::TransactionService;

/// Interval used when a caller does not specify one.
pub const DEFAULT_INTERVAL_DAYS: u32 = 30;

pub struct RecurringService;

impl RecurringService {
    pub fn validate_rule(
        amount: &AmountInput,
        category: &str,
        kind: &str,
        interval_days: u32,
    ) -> Result<RecurringRule> {
        let amount = TransactionService::positive_amount(amount)?;
        let category = normalize_category(category).map_err(LedgerError::Validation)?;
        let kind = TransactionKind::from_str(kind).map_err(LedgerError::Validation)?;
        if interval_days == 0 {
            return Err(LedgerError::validation("interval must be at least one day"));
        }
        Ok(RecurringRule::new(amount, category, kind, interval_days))
    }

    /// Indices of rules due on `today`, in rule order.
    pub fn due_indices(state: &LedgerState, today: NaiveDate) -> Vec<usize> {
        state
            .recurring
            .iter()
            .enumerate()
            .filter(|(_, rule)| rule.is_due(today))
            .map(|(index, _)| index)
            .collect()
    }

    /// The single transaction a due rule produces, dated `today` rather than
    /// the theoretical due date.
    pub fn materialize(rule: &RecurringRule, today: NaiveDate) -> Result<Transaction> {
        TransactionService::build(rule.amount, &rule.category, rule.kind, today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::Amount;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn validate_rule_checks_every_field() {
        let rule = RecurringService::validate_rule(&"30".into(), "Internet", "expense", 30).unwrap();
        assert_eq!(rule.category, "internet");
        assert_eq!(rule.last_applied, None);

        assert!(RecurringService::validate_rule(&"0".into(), "internet", "expense", 30).is_err());
        assert!(RecurringService::validate_rule(&"30".into(), " ", "expense", 30).is_err());
        assert!(RecurringService::validate_rule(&"30".into(), "internet", "bill", 30).is_err());
        assert!(RecurringService::validate_rule(&"30".into(), "internet", "expense", 0).is_err());
    }

    #[test]
    fn due_indices_follow_last_applied() {
        let mut state = LedgerState::new();
        let mut applied = RecurringService::validate_rule(&"10".into(), "gym", "expense", 7).unwrap();
        applied.last_applied = Some(date(2024, 3, 1));
        state.recurring.push(applied);
        state
            .recurring
            .push(RecurringService::validate_rule(&"20".into(), "rent", "expense", 30).unwrap());

        assert_eq!(RecurringService::due_indices(&state, date(2024, 3, 5)), vec![1]);
        assert_eq!(RecurringService::due_indices(&state, date(2024, 3, 8)), vec![0, 1]);
    }

    #[test]
    fn materialize_dates_transaction_today() {
        let mut rule = RecurringService::validate_rule(&"10".into(), "gym", "expense", 7).unwrap();
        rule.last_applied = Some(date(2024, 1, 1));
        let txn = RecurringService::materialize(&rule, date(2024, 4, 1)).unwrap();
        assert_eq!(txn.date, date(2024, 4, 1));
        assert_eq!(txn.amount, Amount::from_str("10").unwrap());

        rule.amount = Amount::ZERO;
        assert!(RecurringService::materialize(&rule, date(2024, 4, 1)).is_err());
    }
}
