use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{amount::Amount, transaction::TransactionKind};

/// A bill or income that repeats every `interval_days` days.
///
/// `last_applied` is the only field that changes after creation; the scheduler
/// moves it forward each time the rule fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringRule {
    pub amount: Amount,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(alias = "interval")]
    pub interval_days: u32,
    #[serde(default)]
    pub last_applied: Option<NaiveDate>,
}

impl RecurringRule {
    pub fn new(
        amount: Amount,
        category: impl Into<String>,
        kind: TransactionKind,
        interval_days: u32,
    ) -> Self {
        Self {
            amount,
            category: category.into(),
            kind,
            interval_days,
            last_applied: None,
        }
    }

    /// Date on which the rule next becomes due, or `None` if it has never fired
    /// (a never-applied rule is due immediately).
    pub fn next_due(&self) -> Option<NaiveDate> {
        self.last_applied
            .map(|last| last + Duration::days(i64::from(self.interval_days)))
    }

    pub fn is_due(&self, today: NaiveDate) -> bool {
        match self.next_due() {
            None => true,
            Some(next) => today >= next,
        }
    }

    pub fn is_expense(&self) -> bool {
        self.kind.is_expense()
    }
}
