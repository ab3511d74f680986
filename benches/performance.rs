use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fintrack_core::core::services::{BudgetService, FundsService};
use fintrack_core::ledger::{Amount, LedgerState, RecurringRule, Transaction, TransactionKind};
use fintrack_core::storage::json_backend::{load_state_from_path, save_state_to_path};
use rust_decimal::Decimal;
use tempfile::tempdir;

const CATEGORIES: [&str; 5] = ["groceries", "rent", "eating out", "transport", "salary"];

fn build_sample_state(txn_count: usize) -> LedgerState {
    let mut state = LedgerState::new();
    let start_date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

    for idx in 0..txn_count {
        let category = CATEGORIES[idx % CATEGORIES.len()];
        let kind = if category == "salary" {
            TransactionKind::Income
        } else {
            TransactionKind::Expense
        };
        let amount = Amount::new(Decimal::new(500 + (idx % 100) as i64 * 25, 1));
        let date = start_date + Duration::days((idx % 365) as i64);
        state
            .transactions
            .push(Transaction::new(amount, category, kind, date));
    }
    for category in &CATEGORIES[..4] {
        state
            .budgets
            .insert(category.to_string(), Amount::new(Decimal::from(400)));
    }
    state.recurring.push(RecurringRule::new(
        Amount::new(Decimal::from(1200)),
        "rent",
        TransactionKind::Expense,
        30,
    ));
    state
}

fn bench_ledger_io(c: &mut Criterion) {
    let state = build_sample_state(black_box(10_000));
    let dir = tempdir().expect("tempdir");
    let file_path = dir.path().join("transactions.json");

    c.bench_function("ledger_save_10k", |b| {
        b.iter(|| {
            save_state_to_path(&state, &file_path).expect("save ledger");
        })
    });

    save_state_to_path(&state, &file_path).expect("seed");

    c.bench_function("ledger_load_10k", |b| {
        b.iter(|| {
            let loaded = load_state_from_path(&file_path).expect("load ledger");
            black_box(loaded);
        })
    });
}

fn bench_ledger_queries(c: &mut Criterion) {
    let state = build_sample_state(black_box(10_000));
    let reference = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();

    c.bench_function("budget_status_10k", |b| {
        b.iter(|| black_box(BudgetService::status(&state, reference, 80)))
    });

    c.bench_function("available_funds_10k", |b| {
        b.iter(|| black_box(FundsService::available(&state, reference)))
    });
}

criterion_group!(benches, bench_ledger_io, bench_ledger_queries);
criterion_main!(benches);
