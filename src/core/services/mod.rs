pub mod budget_service;
pub mod funds_service;
pub mod recurring_service;
pub mod transaction_service;

pub use budget_service::{BudgetService, DEFAULT_APPROACHING_PERCENT};
pub use funds_service::FundsService;
pub use recurring_service::{RecurringService, DEFAULT_INTERVAL_DAYS};
pub use transaction_service::TransactionService;
