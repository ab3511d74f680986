use crate::cli::commands::usage;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::{CommandResult, ShellContext};
use crate::ledger::{display_category, BudgetHealth};

const BUDGET_USAGE: &str = "budget <set <category> <amount>|status>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "budget",
        "Set monthly category limits or show their status",
        BUDGET_USAGE,
        cmd_budget,
    )]
}

fn cmd_budget(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return show_status(context);
    };
    match (subcommand.to_ascii_lowercase().as_str(), rest) {
        ("set", [category, amount]) => {
            context.manager.set_budget(category, *amount)?;
            let key = category.trim().to_lowercase();
            let limit = context.manager.budgets().get(&key).copied().unwrap_or_default();
            output::success(format!(
                "Monthly budget for {} set to {}.",
                display_category(&key),
                context.money(limit)
            ));
            Ok(())
        }
        ("status", []) => show_status(context),
        _ => Err(usage(BUDGET_USAGE)),
    }
}

fn show_status(context: &ShellContext) -> CommandResult {
    let status = context.manager.budget_status();
    if status.is_empty() {
        output::info("No budgets set. Use `budget set <category> <amount>`.");
        return Ok(());
    }

    output::section(format!("Budgets for {}", context.manager.today().format("%B %Y")));
    let rows: Vec<Vec<String>> = status
        .iter()
        .map(|(category, entry)| {
            let health = match entry.health {
                BudgetHealth::OnTrack => "on track",
                BudgetHealth::Approaching => "approaching",
                BudgetHealth::Exceeded => "EXCEEDED",
            };
            vec![
                display_category(category),
                context.money(entry.spent),
                context.money(entry.limit),
                context.money(entry.remaining),
                health.to_string(),
            ]
        })
        .collect();
    output::table(&["Category", "Spent", "Limit", "Remaining", "Status"], &rows);
    Ok(())
}
