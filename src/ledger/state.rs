use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{
    budget::Budgets, notification::Notification, recurring::RecurringRule,
    transaction::Transaction,
};

/// The whole persisted ledger. Loaded and written as a single document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerState {
    /// Insertion order, not chronological.
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub budgets: Budgets,
    #[serde(default)]
    pub recurring: Vec<RecurringRule>,
    #[serde(default)]
    pub notifications: Vec<Notification>,
}

/// Shape of the document found on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// A bare array of transactions written by the first release.
    Legacy,
    /// An object with `transactions`, `budgets`, `recurring` and `notifications`.
    Current,
}

fn fold_category(raw: &str) -> String {
    raw.trim().to_lowercase()
}

impl LedgerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
            && self.budgets.is_empty()
            && self.recurring.is_empty()
            && self.notifications.is_empty()
    }

    /// Parses either document shape. Legacy input fills only `transactions`.
    ///
    /// Category names are normalized on the way in so hand-edited documents
    /// match the lowercase keys every lookup uses.
    pub fn from_json_str(data: &str) -> Result<(Self, DocumentFormat), serde_json::Error> {
        let value: Value = serde_json::from_str(data)?;
        let (mut state, format) = match value {
            Value::Array(_) => {
                let transactions: Vec<Transaction> = serde_json::from_value(value)?;
                (
                    Self {
                        transactions,
                        ..Self::default()
                    },
                    DocumentFormat::Legacy,
                )
            }
            other => (serde_json::from_value(other)?, DocumentFormat::Current),
        };
        state.normalize_categories();
        Ok((state, format))
    }

    fn normalize_categories(&mut self) {
        let budgets = std::mem::take(&mut self.budgets);
        self.budgets = budgets
            .into_iter()
            .map(|(category, limit)| (fold_category(&category), limit))
            .collect();
        for txn in &mut self.transactions {
            txn.category = fold_category(&txn.category);
        }
        for rule in &mut self.recurring {
            rule.category = fold_category(&rule.category);
        }
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_array_loads_as_transactions_only() {
        let raw = r#"[
            {"amount": 1000.0, "category": "salary", "type": "income", "date": "2024-01-01"},
            {"amount": 200.0, "category": "food", "type": "expense", "date": "2024-01-15"}
        ]"#;
        let (state, format) = LedgerState::from_json_str(raw).unwrap();
        assert_eq!(format, DocumentFormat::Legacy);
        assert_eq!(state.transactions.len(), 2);
        assert!(state.budgets.is_empty());
        assert!(state.recurring.is_empty());
        assert!(state.notifications.is_empty());
    }

    #[test]
    fn partial_object_defaults_missing_collections() {
        let raw = r#"{"budgets": {"food": 150}}"#;
        let (state, format) = LedgerState::from_json_str(raw).unwrap();
        assert_eq!(format, DocumentFormat::Current);
        assert!(state.transactions.is_empty());
        assert_eq!(state.budgets.len(), 1);
    }

    #[test]
    fn mixed_case_categories_are_folded_on_load() {
        let raw = r#"{
            "transactions": [{"amount": 20, "category": " Food", "type": "expense", "date": "2024-01-02"}],
            "budgets": {"Food": 150, "Eating Out ": 40},
            "recurring": [{"amount": 30, "category": "Internet", "type": "expense", "interval_days": 30}]
        }"#;
        let (state, _) = LedgerState::from_json_str(raw).unwrap();
        let keys: Vec<&str> = state.budgets.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["eating out", "food"]);
        assert_eq!(state.transactions[0].category, "food");
        assert_eq!(state.recurring[0].category, "internet");
    }

    #[test]
    fn non_document_values_are_rejected() {
        assert!(LedgerState::from_json_str("42").is_err());
        assert!(LedgerState::from_json_str("{not json").is_err());
        assert!(LedgerState::from_json_str(r#"[{"amount": "abc"}]"#).is_err());
    }

    #[test]
    fn serialized_layout_has_four_named_fields() {
        let json = LedgerState::new().to_json_string().unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        for key in ["transactions", "budgets", "recurring", "notifications"] {
            assert!(value.get(key).is_some(), "missing `{key}`");
        }
    }
}
