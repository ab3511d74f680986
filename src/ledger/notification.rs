use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

use super::{amount::Amount, transaction::display_category};

const TIMESTAMP_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    BudgetAlert,
}

/// Entry in the append-only alert log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    #[serde(alias = "type")]
    pub kind: NotificationKind,
    pub category: String,
    /// Amount of the transaction that pushed spending over the limit.
    pub amount: Amount,
    pub limit: Amount,
    /// Month-to-date spend including the triggering transaction.
    pub spent: Amount,
    #[serde(alias = "date", deserialize_with = "deserialize_timestamp")]
    pub timestamp: NaiveDateTime,
    pub message: String,
}

impl Notification {
    pub fn budget_alert(
        category: &str,
        amount: Amount,
        limit: Amount,
        spent: Amount,
        timestamp: NaiveDateTime,
    ) -> Self {
        let message = format!(
            "Budget exceeded for {}! ({} of {})",
            display_category(category),
            spent,
            limit
        );
        Self {
            kind: NotificationKind::BudgetAlert,
            category: category.to_string(),
            amount,
            limit,
            spent,
            timestamp,
            message,
        }
    }
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw.trim(), format).ok())
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp `{raw}`")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn ts() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    #[test]
    fn budget_alert_message_is_human_readable() {
        let note = Notification::budget_alert(
            "eating out",
            Amount::from_str("200").unwrap(),
            Amount::from_str("150").unwrap(),
            Amount::from_str("200").unwrap(),
            ts(),
        );
        assert_eq!(note.message, "Budget exceeded for Eating Out! ($200.00 of $150.00)");
        assert_eq!(note.kind, NotificationKind::BudgetAlert);
    }

    #[test]
    fn reads_legacy_notification_keys() {
        let raw = r#"{
            "type": "budget_alert",
            "category": "food",
            "amount": 50.0,
            "limit": 100.0,
            "spent": 120.0,
            "date": "2024-01-15 09:30",
            "message": "Budget exceeded for Food! ($120.00 of $100.00)"
        }"#;
        let note: Notification = serde_json::from_str(raw).unwrap();
        assert_eq!(note.timestamp, ts());
        assert_eq!(note.spent, Amount::from_str("120").unwrap());
    }

    #[test]
    fn current_format_roundtrips() {
        let note = Notification::budget_alert(
            "food",
            Amount::from_str("10").unwrap(),
            Amount::from_str("5").unwrap(),
            Amount::from_str("10").unwrap(),
            ts(),
        );
        let json = serde_json::to_string(&note).unwrap();
        assert!(json.contains("\"kind\":\"budget_alert\""));
        let back: Notification = serde_json::from_str(&json).unwrap();
        assert_eq!(back, note);
    }
}
