use crate::cli::commands::usage;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::{CommandResult, ShellContext};
use crate::core::services::FundsService;
use crate::ledger::TransactionKind;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("funds", "Show available funds", "funds", cmd_funds),
        CommandEntry::new(
            "summary",
            "Show totals, this month's spending and recent activity",
            "summary",
            cmd_summary,
        ),
        CommandEntry::new(
            "alerts",
            "Show or clear budget alerts",
            "alerts [clear]",
            cmd_alerts,
        ),
    ]
}

fn cmd_funds(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let manager = &context.manager;
    let today = manager.today();
    output::two_column(&[
        (
            "Income",
            context.money(FundsService::total(manager.state(), TransactionKind::Income)),
        ),
        (
            "Expenses",
            context.money(FundsService::total(manager.state(), TransactionKind::Expense)),
        ),
        (
            "Bills due",
            context.money(FundsService::pending_obligations(manager.state(), today)),
        ),
        ("Available", context.money(manager.available_funds())),
    ]);
    Ok(())
}

fn cmd_summary(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    cmd_funds(context, args)?;

    let manager = &context.manager;
    output::section("This month");
    output::two_column(&[
        ("Spent", context.money(manager.month_to_date_spend())),
        ("Budgets", manager.budgets().len().to_string()),
        (
            "Over budget",
            manager
                .budget_status()
                .values()
                .filter(|status| status.is_exceeded())
                .count()
                .to_string(),
        ),
        ("Alerts", manager.notifications().len().to_string()),
    ]);

    let recent = manager.recent_transactions(context.config.recent_count);
    if !recent.is_empty() {
        output::section("Recent transactions");
        let rows: Vec<Vec<String>> = recent
            .into_iter()
            .map(|txn| context.transaction_row(txn))
            .collect();
        output::table(&["Date", "Amount", "Category", "Type"], &rows);
    }
    Ok(())
}

fn cmd_alerts(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            let alerts = context.manager.notifications();
            if alerts.is_empty() {
                output::info("No budget alerts.");
                return Ok(());
            }
            output::section("Budget alerts");
            for alert in alerts {
                output::warning(format!(
                    "{}  {}",
                    alert.timestamp.format("%Y-%m-%d %H:%M"),
                    alert.message
                ));
            }
            Ok(())
        }
        [action] if action.eq_ignore_ascii_case("clear") => {
            let cleared = context.manager.clear_notifications()?;
            output::success(format!("Cleared {cleared} alert(s)."));
            Ok(())
        }
        _ => Err(usage("alerts [clear]")),
    }
}
