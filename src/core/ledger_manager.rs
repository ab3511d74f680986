use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::core::clock::{Clock, SystemClock};
use crate::core::services::{
    BudgetService, FundsService, RecurringService, TransactionService,
    DEFAULT_APPROACHING_PERCENT,
};
use crate::errors::{LedgerError, Result};
use crate::ledger::{
    Amount, AmountInput, BudgetStatus, Budgets, DocumentFormat, LedgerState, Notification,
    RecurringRule, Transaction, TransactionDraft, TransactionMatcher,
};
use crate::storage::{LedgerStorage, LoadOutcome};

/// What happened while opening the ledger.
#[derive(Debug, Clone, Default)]
pub struct OpenReport {
    /// Shape of the document that was read, if any.
    pub format: Option<DocumentFormat>,
    /// Set when a corrupt document was replaced by an empty ledger.
    pub recovered_from: Option<String>,
    /// Transactions produced by the startup recurring run.
    pub materialized: Vec<Transaction>,
}

/// Facade that owns the ledger state and routes every mutation through
/// validation, budget checks and persistence.
///
/// Every mutating call persists the whole aggregate before returning `Ok`.
/// If the write fails the in-memory change stays applied but the call returns
/// [`LedgerError::Persistence`]; callers must treat it as unconfirmed.
pub struct LedgerManager {
    state: LedgerState,
    storage: Box<dyn LedgerStorage>,
    clock: Box<dyn Clock>,
    approaching_percent: u8,
}

impl LedgerManager {
    pub fn new(state: LedgerState, storage: Box<dyn LedgerStorage>, clock: Box<dyn Clock>) -> Self {
        Self {
            state,
            storage,
            clock,
            approaching_percent: DEFAULT_APPROACHING_PERCENT,
        }
    }

    /// Loads the persisted ledger without running the scheduler.
    ///
    /// A missing or corrupt document yields an empty ledger.
    pub fn load(storage: Box<dyn LedgerStorage>, clock: Box<dyn Clock>) -> Result<(Self, OpenReport)> {
        let mut report = OpenReport::default();
        let state = match storage.load()? {
            LoadOutcome::Loaded { state, format } => {
                debug!(
                    location = %storage.describe(),
                    ?format,
                    transactions = state.transactions.len(),
                    "ledger loaded"
                );
                report.format = Some(format);
                state
            }
            LoadOutcome::Missing => {
                debug!(location = %storage.describe(), "no ledger found, starting empty");
                LedgerState::new()
            }
            LoadOutcome::Corrupt { reason } => {
                warn!(location = %storage.describe(), %reason, "corrupt ledger, starting empty");
                report.recovered_from = Some(reason);
                LedgerState::new()
            }
        };
        Ok((Self::new(state, storage, clock), report))
    }

    /// Loads the ledger and catches up overdue recurring bills.
    pub fn open(storage: Box<dyn LedgerStorage>, clock: Box<dyn Clock>) -> Result<(Self, OpenReport)> {
        let (mut manager, mut report) = Self::load(storage, clock)?;
        let today = manager.clock.today();
        report.materialized = manager.process_recurring(today)?;
        Ok((manager, report))
    }

    /// Opens with the system clock.
    pub fn open_with_system_clock(storage: Box<dyn LedgerStorage>) -> Result<(Self, OpenReport)> {
        Self::open(storage, Box::new(SystemClock))
    }

    pub fn set_approaching_percent(&mut self, percent: u8) {
        self.approaching_percent = percent;
    }

    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.state.transactions
    }

    pub fn budgets(&self) -> &Budgets {
        &self.state.budgets
    }

    pub fn recurring(&self) -> &[RecurringRule] {
        &self.state.recurring
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.state.notifications
    }

    pub fn storage_location(&self) -> String {
        self.storage.describe()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Writes the whole aggregate.
    pub fn save(&self) -> Result<()> {
        self.storage.save(&self.state)
    }

    /// Validates and appends a transaction, runs the budget check, then persists once.
    pub fn add_transaction(
        &mut self,
        amount: impl Into<AmountInput>,
        category: &str,
        kind: &str,
        date: Option<&str>,
    ) -> Result<Transaction> {
        let txn =
            TransactionService::validate(amount.into(), category, kind, date, self.clock.today())?;
        self.record(txn)
    }

    /// Accepts a parsed candidate record with no special casing.
    pub fn add_draft(&mut self, draft: &TransactionDraft) -> Result<Transaction> {
        let txn = TransactionService::validate_draft(draft, self.clock.today())?;
        self.record(txn)
    }

    /// Removes the first transaction whose visible fields equal `matcher`.
    pub fn delete_transaction(&mut self, matcher: &TransactionMatcher) -> Result<Transaction> {
        let removed = TransactionService::remove_matching(&mut self.state, matcher)?;
        debug!(id = %removed.id, "transaction deleted");
        self.save()?;
        Ok(removed)
    }

    pub fn delete_transaction_by_id(&mut self, id: Uuid) -> Result<Transaction> {
        let removed = TransactionService::remove_by_id(&mut self.state, id)?;
        debug!(id = %removed.id, "transaction deleted");
        self.save()?;
        Ok(removed)
    }

    /// Creates or overwrites the monthly limit for a category.
    pub fn set_budget(&mut self, category: &str, amount: impl Into<AmountInput>) -> Result<()> {
        let (category, limit) = BudgetService::validate_limit(category, &amount.into())?;
        debug!(%category, %limit, "budget set");
        self.state.budgets.insert(category, limit);
        self.save()
    }

    pub fn add_recurring_rule(
        &mut self,
        amount: impl Into<AmountInput>,
        category: &str,
        kind: &str,
        interval_days: u32,
    ) -> Result<RecurringRule> {
        let rule = RecurringService::validate_rule(&amount.into(), category, kind, interval_days)?;
        debug!(category = %rule.category, interval_days, "recurring rule added");
        self.state.recurring.push(rule.clone());
        self.save()?;
        Ok(rule)
    }

    pub fn delete_recurring_rule(&mut self, index: usize) -> Result<RecurringRule> {
        if index >= self.state.recurring.len() {
            return Err(LedgerError::not_found(format!("recurring rule #{}", index + 1)));
        }
        let rule = self.state.recurring.remove(index);
        debug!(category = %rule.category, index, "recurring rule removed");
        self.save()?;
        Ok(rule)
    }

    /// Fires every due rule once, dated `today`, and returns the new transactions.
    ///
    /// Missed periods are not back-filled: a rule overdue by several intervals
    /// still produces a single transaction. Calling this when nothing is due
    /// does not write.
    pub fn process_recurring(&mut self, today: NaiveDate) -> Result<Vec<Transaction>> {
        let mut fired = Vec::new();
        for index in RecurringService::due_indices(&self.state, today) {
            let txn = match RecurringService::materialize(&self.state.recurring[index], today) {
                Ok(txn) => txn,
                Err(err) => {
                    warn!(rule = index, error = %err, "skipping invalid recurring rule");
                    continue;
                }
            };
            self.state.recurring[index].last_applied = Some(today);
            fired.push(self.record(txn)?);
        }

        if !fired.is_empty() {
            info!(count = fired.len(), %today, "recurring rules applied");
            self.save()?;
        }
        Ok(fired)
    }

    /// Runs the scheduler for the clock's current date.
    pub fn process_recurring_now(&mut self) -> Result<Vec<Transaction>> {
        let today = self.clock.today();
        self.process_recurring(today)
    }

    pub fn available_funds(&self) -> Amount {
        self.available_funds_on(self.clock.today())
    }

    pub fn available_funds_on(&self, today: NaiveDate) -> Amount {
        FundsService::available(&self.state, today)
    }

    /// True if an expense of `amount` would exceed the currently available funds.
    pub fn would_overdraw(&self, amount: Amount) -> bool {
        amount > self.available_funds()
    }

    pub fn budget_status(&self) -> BTreeMap<String, BudgetStatus> {
        self.budget_status_for(self.clock.today())
    }

    pub fn budget_status_for(&self, reference: NaiveDate) -> BTreeMap<String, BudgetStatus> {
        BudgetService::status(&self.state, reference, self.approaching_percent)
    }

    /// Total expenses so far in the current month, across all categories.
    pub fn month_to_date_spend(&self) -> Amount {
        self.month_to_date_spend_on(self.clock.today())
    }

    pub fn month_to_date_spend_on(&self, reference: NaiveDate) -> Amount {
        BudgetService::total_month_spend(&self.state.transactions, reference)
    }

    pub fn recent_transactions(&self, count: usize) -> Vec<&Transaction> {
        TransactionService::recent(&self.state, count)
    }

    /// Empties the alert log and returns how many entries were dropped.
    pub fn clear_notifications(&mut self) -> Result<usize> {
        let count = self.state.notifications.len();
        self.state.notifications.clear();
        debug!(count, "notifications cleared");
        self.save()?;
        Ok(count)
    }

    fn record(&mut self, txn: Transaction) -> Result<Transaction> {
        self.state.transactions.push(txn.clone());
        debug!(id = %txn.id, kind = %txn.kind, category = %txn.category, "transaction added");
        if let Some(alert) = BudgetService::check(&self.state, &txn, self.clock.now()) {
            info!(category = %alert.category, spent = %alert.spent, limit = %alert.limit, "budget exceeded");
            self.state.notifications.push(alert);
        }
        self.save()?;
        Ok(txn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::FixedClock;
    use crate::storage::MemoryStorage;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn manager_on(today: NaiveDate) -> (LedgerManager, MemoryStorage) {
        let storage = MemoryStorage::new();
        let (manager, _) =
            LedgerManager::load(Box::new(storage.clone()), Box::new(FixedClock::on(today)))
                .expect("load");
        (manager, storage)
    }

    #[test]
    fn rejected_add_leaves_state_and_store_untouched() {
        let (mut manager, storage) = manager_on(date(2024, 1, 1));
        let err = manager
            .add_transaction("-3", "food", "expense", None)
            .expect_err("negative amount");
        assert!(err.is_rejection());
        assert!(manager.transactions().is_empty());
        assert_eq!(storage.save_count(), 0);
    }

    #[test]
    fn alert_is_persisted_with_the_transaction() {
        let (mut manager, storage) = manager_on(date(2024, 1, 20));
        manager.set_budget("food", "10").unwrap();
        manager.add_transaction("11", "food", "expense", None).unwrap();
        assert_eq!(manager.notifications().len(), 1);
        assert_eq!(storage.save_count(), 2);
        let document = storage.document().unwrap();
        assert!(document.contains("budget_alert"));
    }

    #[test]
    fn failed_save_surfaces_persistence_error() {
        let (mut manager, storage) = manager_on(date(2024, 1, 20));
        storage.set_fail_saves(true);
        let err = manager
            .add_transaction("5", "food", "expense", None)
            .expect_err("save should fail");
        assert!(matches!(err, LedgerError::Persistence(_)));
        assert!(!err.is_rejection());
    }

    #[test]
    fn delete_recurring_rule_out_of_range_is_not_found() {
        let (mut manager, _) = manager_on(date(2024, 1, 20));
        assert!(matches!(
            manager.delete_recurring_rule(0),
            Err(LedgerError::NotFound(_))
        ));
    }

    #[test]
    fn clear_notifications_reports_count() {
        let (mut manager, _) = manager_on(date(2024, 1, 20));
        manager.set_budget("food", "1").unwrap();
        manager.add_transaction("2", "food", "expense", None).unwrap();
        manager.add_transaction("2", "food", "expense", None).unwrap();
        assert_eq!(manager.clear_notifications().unwrap(), 2);
        assert!(manager.notifications().is_empty());
    }
}
