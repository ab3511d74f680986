use thiserror::Error;

/// Error type that captures ledger failures surfaced to callers.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Malformed amount, category, type, date or interval. State is unchanged.
    #[error("Invalid input: {0}")]
    Validation(String),
    /// The requested record does not exist. State is unchanged.
    #[error("Not found: {0}")]
    NotFound(String),
    /// The durable write failed. The in-memory mutation is unconfirmed.
    #[error("Persistence error: {0}")]
    Persistence(String),
}

pub type Result<T> = std::result::Result<T, LedgerError>;

impl LedgerError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        LedgerError::Validation(message.into())
    }

    pub(crate) fn not_found(message: impl Into<String>) -> Self {
        LedgerError::NotFound(message.into())
    }

    /// Returns true for failures that leave the ledger state untouched.
    pub fn is_rejection(&self) -> bool {
        matches!(self, LedgerError::Validation(_) | LedgerError::NotFound(_))
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        LedgerError::Persistence(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        LedgerError::Persistence(err.to_string())
    }
}
