mod common;

use assert_cmd::Command;
use common::temp_base;
use predicates::str::contains;

fn script(home: &std::path::Path, input: &str) -> assert_cmd::assert::Assert {
    Command::cargo_bin("fintrack_cli")
        .unwrap()
        .env("FINTRACK_HOME", home)
        .env("FINTRACK_CLI_SCRIPT", "1")
        .write_stdin(input)
        .assert()
}

#[test]
fn script_mode_records_and_reports_funds() {
    let home = temp_base();
    script(
        &home,
        "add 1000 salary income 2024-01-01\nadd 50 Food expense 2024-01-02\nfunds\nexit\n",
    )
    .success()
    .stdout(contains("Added income of $1000.00 to Salary"))
    .stdout(contains("$950.00"));

    let json = std::fs::read_to_string(home.join("transactions.json")).unwrap();
    assert!(json.contains("\"food\""));
    assert!(json.contains("\"budgets\""));
}

#[test]
fn overspend_prints_alert_and_persists_it() {
    let home = temp_base();
    script(
        &home,
        "budget set \"eating out\" 10\nadd 20 \"Eating Out\" expense 2024-01-15\nalerts\n",
    )
    .success()
    .stdout(contains("Budget exceeded for Eating Out! ($20.00 of $10.00)"));

    let json = std::fs::read_to_string(home.join("transactions.json")).unwrap();
    assert!(json.contains("budget_alert"));
}

#[test]
fn rejected_operations_do_not_stop_the_script() {
    let home = temp_base();
    script(
        &home,
        "add -5 food expense\ndelete 2024-01-01 5 food expense\nlist\n",
    )
    .success()
    .stderr(contains("Rejected"))
    .stdout(contains("No transactions recorded yet."));
}

#[test]
fn recurring_rules_apply_on_run() {
    let home = temp_base();
    script(
        &home,
        "recurring add 30 internet expense 30\nrecurring run 2024-03-01\nrecurring list\nrecurring run 2024-03-05\n",
    )
    .success()
    .stdout(contains("Applied expense of $30.00 for Internet."))
    .stdout(contains("2024-03-31"))
    .stdout(contains("No recurring rules are due."));
}

#[test]
fn unknown_command_suggests_closest_match() {
    let home = temp_base();
    script(&home, "budgte status\n")
        .success()
        .stdout(contains("Did you mean `budget`?"));
}
