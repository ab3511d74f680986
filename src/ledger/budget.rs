use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::amount::Amount;

/// Monthly spending limits keyed by lowercase category.
pub type Budgets = BTreeMap<String, Amount>;

/// Coarse classification of how a category is tracking against its limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetHealth {
    OnTrack,
    Approaching,
    Exceeded,
}

/// Month-to-date position of one budgeted category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetStatus {
    pub limit: Amount,
    pub spent: Amount,
    /// `limit - spent`, floored at zero.
    pub remaining: Amount,
    pub health: BudgetHealth,
}

impl BudgetStatus {
    pub fn new(limit: Amount, spent: Amount, approaching_percent: u8) -> Self {
        let health = if spent > limit {
            BudgetHealth::Exceeded
        } else if spent.value() * Decimal::ONE_HUNDRED
            >= limit.value() * Decimal::from(approaching_percent)
            && spent.is_positive()
        {
            BudgetHealth::Approaching
        } else {
            BudgetHealth::OnTrack
        };
        Self {
            limit,
            spent,
            remaining: limit.saturating_sub(spent),
            health,
        }
    }

    pub fn is_exceeded(&self) -> bool {
        self.health == BudgetHealth::Exceeded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn amt(s: &str) -> Amount {
        Amount::from_str(s).unwrap()
    }

    #[test]
    fn remaining_is_floored_and_health_follows_spend() {
        let over = BudgetStatus::new(amt("150"), amt("200"), 80);
        assert_eq!(over.remaining, Amount::ZERO);
        assert_eq!(over.health, BudgetHealth::Exceeded);

        let exact = BudgetStatus::new(amt("150"), amt("150"), 80);
        assert_eq!(exact.remaining, Amount::ZERO);
        assert_eq!(exact.health, BudgetHealth::Approaching);

        let near = BudgetStatus::new(amt("100"), amt("80"), 80);
        assert_eq!(near.health, BudgetHealth::Approaching);

        let fine = BudgetStatus::new(amt("100"), amt("79.99"), 80);
        assert_eq!(fine.health, BudgetHealth::OnTrack);
        assert_eq!(fine.remaining, amt("20.01"));
    }

    #[test]
    fn untouched_budget_is_on_track() {
        let status = BudgetStatus::new(amt("100"), Amount::ZERO, 0);
        assert_eq!(status.health, BudgetHealth::OnTrack);
        assert_eq!(status.remaining, amt("100"));
    }
}
