use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::amount::{Amount, AmountInput};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Direction of a money movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    #[serde(alias = "Income", alias = "INCOME")]
    Income,
    #[serde(alias = "Expense", alias = "EXPENSE")]
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    pub fn is_expense(&self) -> bool {
        matches!(self, TransactionKind::Expense)
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            other => Err(format!(
                "transaction type must be `income` or `expense`, got `{other}`"
            )),
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recorded money movement. Immutable once stored; removed only as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub amount: Amount,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub date: NaiveDate,
}

impl Transaction {
    /// Builds a transaction from already-validated parts.
    pub fn new(amount: Amount, category: impl Into<String>, kind: TransactionKind, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            category: category.into(),
            kind,
            date,
        }
    }

    pub fn is_expense(&self) -> bool {
        self.kind.is_expense()
    }

    /// Structural match on the user-visible fields; the id is ignored.
    pub fn matches(&self, matcher: &TransactionMatcher) -> bool {
        self.date == matcher.date
            && self.amount == matcher.amount
            && self.category.to_lowercase() == matcher.category
            && self.kind == matcher.kind
    }
}

/// Candidate transaction as produced by a form or a text parser.
///
/// Fields are loosely typed; [`crate::core::services::TransactionService::validate`]
/// turns a draft into a [`Transaction`] or rejects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDraft {
    pub amount: DraftAmount,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Draft amounts arrive either as JSON numbers or as free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DraftAmount {
    Number(f64),
    Text(String),
}

impl From<DraftAmount> for AmountInput {
    fn from(value: DraftAmount) -> Self {
        match value {
            DraftAmount::Number(number) => AmountInput::Float(number),
            DraftAmount::Text(text) => AmountInput::Text(text),
        }
    }
}

impl TransactionDraft {
    pub fn new(
        amount: impl Into<String>,
        category: impl Into<String>,
        kind: impl Into<String>,
        date: Option<String>,
    ) -> Self {
        Self {
            amount: DraftAmount::Text(amount.into()),
            category: category.into(),
            kind: kind.into(),
            date,
        }
    }
}

/// Identifies a stored transaction by its visible fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionMatcher {
    pub date: NaiveDate,
    pub amount: Amount,
    pub category: String,
    pub kind: TransactionKind,
}

impl TransactionMatcher {
    /// Builds a matcher, normalizing the category the same way stored records are.
    pub fn new(date: NaiveDate, amount: Amount, category: &str, kind: TransactionKind) -> Self {
        Self {
            date,
            amount,
            category: category.trim().to_lowercase(),
            kind,
        }
    }

    /// Parses the four display columns (`date`, `amount`, `category`, `type`).
    pub fn parse(date: &str, amount: &str, category: &str, kind: &str) -> Result<Self, String> {
        let date = parse_date(date)?;
        let amount = Amount::from_str(amount).map_err(|err| err.to_string())?;
        let kind = TransactionKind::from_str(kind)?;
        Ok(Self::new(date, amount, category, kind))
    }
}

impl From<&Transaction> for TransactionMatcher {
    fn from(txn: &Transaction) -> Self {
        Self::new(txn.date, txn.amount, &txn.category, txn.kind)
    }
}

/// Lowercases and trims a category name, rejecting blanks.
pub fn normalize_category(raw: &str) -> Result<String, String> {
    let category = raw.trim().to_lowercase();
    if category.is_empty() {
        Err("category must not be empty".into())
    } else {
        Ok(category)
    }
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| format!("`{}` is not a valid YYYY-MM-DD date", raw.trim()))
}

/// Re-titlecases a stored category for display (`"eating out"` -> `"Eating Out"`).
pub fn display_category(category: &str) -> String {
    category
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!(" Expense ".parse::<TransactionKind>(), Ok(TransactionKind::Expense));
        assert_eq!("INCOME".parse::<TransactionKind>(), Ok(TransactionKind::Income));
        assert!("transfer".parse::<TransactionKind>().is_err());
    }

    #[test]
    fn matcher_ignores_id_and_category_case() {
        let txn = Transaction::new(
            Amount::from_str("20").unwrap(),
            "food",
            TransactionKind::Expense,
            date(2024, 1, 2),
        );
        let matcher = TransactionMatcher::parse("2024-01-02", "20.00", " Food", "expense").unwrap();
        assert!(txn.matches(&matcher));

        let other = TransactionMatcher::parse("2024-01-02", "20.00", "food", "income").unwrap();
        assert!(!txn.matches(&other));
    }

    #[test]
    fn legacy_rows_without_id_receive_one() {
        let raw = r#"{"amount": 12.5, "category": "food", "type": "expense", "date": "2024-02-01"}"#;
        let txn: Transaction = serde_json::from_str(raw).unwrap();
        assert!(!txn.id.is_nil());
        assert_eq!(txn.amount, Amount::from_str("12.50").unwrap());
        assert_eq!(txn.kind, TransactionKind::Expense);
    }

    #[test]
    fn draft_accepts_numeric_or_text_amounts() {
        let numeric: TransactionDraft =
            serde_json::from_str(r#"{"amount": 20.0, "category": "Food", "type": "expense"}"#).unwrap();
        assert_eq!(numeric.amount, DraftAmount::Number(20.0));
        assert_eq!(numeric.date, None);

        let text: TransactionDraft = serde_json::from_str(
            r#"{"amount": "20", "category": "Food", "type": "expense", "date": "2024-03-01"}"#,
        )
        .unwrap();
        assert_eq!(text.amount, DraftAmount::Text("20".into()));
    }

    #[test]
    fn category_helpers_normalize_and_titlecase() {
        assert_eq!(normalize_category("  Eating Out "), Ok("eating out".into()));
        assert!(normalize_category("   ").is_err());
        assert_eq!(display_category("eating out"), "Eating Out");
    }
}
