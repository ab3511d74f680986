use std::str::FromStr;

use crate::cli::commands::{invalid, usage};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::{CommandResult, ShellContext};
use crate::ledger::{display_category, Amount, TransactionKind, TransactionMatcher};

const ADD_USAGE: &str = "add <amount> <category> <income|expense> [YYYY-MM-DD]";
const DELETE_USAGE: &str = "delete <YYYY-MM-DD> <amount> <category> <income|expense>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("add", "Record an income or expense", ADD_USAGE, cmd_add),
        CommandEntry::new(
            "delete",
            "Remove a transaction by its listed fields",
            DELETE_USAGE,
            cmd_delete,
        ),
        CommandEntry::new("list", "Show the most recent transactions", "list [count]", cmd_list),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [amount, category, kind, rest @ ..] = args else {
        return Err(usage(ADD_USAGE));
    };
    if rest.len() > 1 {
        return Err(usage(ADD_USAGE));
    }
    let date = rest.first().copied();

    if TransactionKind::from_str(kind).is_ok_and(|kind| kind.is_expense()) {
        if let Ok(value) = Amount::from_str(amount) {
            if context.manager.would_overdraw(value) {
                output::warning(format!(
                    "This expense exceeds your available funds ({}).",
                    context.money(context.manager.available_funds())
                ));
            }
        }
    }

    let alerts_before = context.manager.notifications().len();
    let txn = context.manager.add_transaction(*amount, category, kind, date)?;
    output::success(format!(
        "Added {} of {} to {} on {}.",
        txn.kind,
        context.money(txn.amount),
        display_category(&txn.category),
        txn.date
    ));
    for alert in &context.manager.notifications()[alerts_before..] {
        output::warning(&alert.message);
    }
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [date, amount, category, kind] = args else {
        return Err(usage(DELETE_USAGE));
    };
    let matcher = TransactionMatcher::parse(date, amount, category, kind).map_err(invalid)?;
    let removed = context.manager.delete_transaction(&matcher)?;
    output::success(format!(
        "Deleted {} of {} from {} on {}.",
        removed.kind,
        context.money(removed.amount),
        display_category(&removed.category),
        removed.date
    ));
    Ok(())
}

fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let count = match args {
        [] => context.config.recent_count,
        [raw] => raw
            .parse::<usize>()
            .map_err(|_| invalid(format!("`{raw}` is not a valid count")))?,
        _ => return Err(usage("list [count]")),
    };

    let recent = context.manager.recent_transactions(count);
    if recent.is_empty() {
        output::info("No transactions recorded yet.");
        return Ok(());
    }
    output::section("Recent transactions");
    let rows: Vec<Vec<String>> = recent
        .into_iter()
        .map(|txn| context.transaction_row(txn))
        .collect();
    output::table(&["Date", "Amount", "Category", "Type"], &rows);
    Ok(())
}
