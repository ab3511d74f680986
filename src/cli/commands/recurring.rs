use crate::cli::commands::{invalid, usage};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::{CommandResult, ShellContext};
use crate::core::services::DEFAULT_INTERVAL_DAYS;
use crate::ledger::{display_category, transaction::parse_date};

const RECURRING_USAGE: &str =
    "recurring <add <amount> <category> [income|expense] [days]|list|remove <number>|run [YYYY-MM-DD]>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "recurring",
        "Manage repeating bills and income",
        RECURRING_USAGE,
        cmd_recurring,
    )]
}

fn cmd_recurring(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return list_rules(context);
    };
    match subcommand.to_ascii_lowercase().as_str() {
        "add" => add_rule(context, rest),
        "list" => list_rules(context),
        "remove" => remove_rule(context, rest),
        "run" => run_rules(context, rest),
        other => Err(invalid(format!("unknown recurring subcommand `{other}`"))),
    }
}

fn add_rule(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (amount, category, kind, interval) = match args {
        [amount, category] => (*amount, *category, "expense", None),
        [amount, category, kind] => (*amount, *category, *kind, None),
        [amount, category, kind, days] => (*amount, *category, *kind, Some(*days)),
        _ => return Err(usage(RECURRING_USAGE)),
    };
    let interval_days = match interval {
        Some(raw) => raw
            .parse::<u32>()
            .map_err(|_| invalid(format!("`{raw}` is not a valid number of days")))?,
        None => DEFAULT_INTERVAL_DAYS,
    };

    let rule = context
        .manager
        .add_recurring_rule(amount, category, kind, interval_days)?;
    output::success(format!(
        "Recurring {} of {} for {} every {} days.",
        rule.kind,
        context.money(rule.amount),
        display_category(&rule.category),
        rule.interval_days
    ));
    output::hint("It will be applied the next time the ledger opens or on `recurring run`.");
    Ok(())
}

fn list_rules(context: &ShellContext) -> CommandResult {
    let rules = context.manager.recurring();
    if rules.is_empty() {
        output::info("No recurring rules.");
        return Ok(());
    }
    output::section("Recurring rules");
    let rows: Vec<Vec<String>> = rules
        .iter()
        .enumerate()
        .map(|(index, rule)| {
            vec![
                (index + 1).to_string(),
                context.money(rule.amount),
                display_category(&rule.category),
                rule.kind.to_string(),
                format!("{} days", rule.interval_days),
                rule.last_applied
                    .map(|date| date.to_string())
                    .unwrap_or_else(|| "never".into()),
                rule.next_due()
                    .map(|date| date.to_string())
                    .unwrap_or_else(|| "now".into()),
            ]
        })
        .collect();
    output::table(
        &["#", "Amount", "Category", "Type", "Every", "Last applied", "Next due"],
        &rows,
    );
    Ok(())
}

fn remove_rule(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [raw] = args else {
        return Err(usage("recurring remove <number>"));
    };
    let number = raw
        .parse::<usize>()
        .ok()
        .filter(|number| *number > 0)
        .ok_or_else(|| invalid(format!("`{raw}` is not a rule number from `recurring list`")))?;
    let rule = context.manager.delete_recurring_rule(number - 1)?;
    output::success(format!(
        "Removed recurring {} for {}.",
        rule.kind,
        display_category(&rule.category)
    ));
    Ok(())
}

fn run_rules(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let today = match args {
        [] => context.manager.today(),
        [raw] => parse_date(raw).map_err(invalid)?,
        _ => return Err(usage("recurring run [YYYY-MM-DD]")),
    };
    let fired = context.manager.process_recurring(today)?;
    if fired.is_empty() {
        output::info("No recurring rules are due.");
        return Ok(());
    }
    for txn in &fired {
        output::success(format!(
            "Applied {} of {} for {}.",
            txn.kind,
            context.money(txn.amount),
            display_category(&txn.category)
        ));
    }
    Ok(())
}
