mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;

fn cli(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("pocket_ledger_cli").unwrap();
    cmd.env("POCKET_LEDGER_CLI_SCRIPT", "1")
        .env("POCKET_LEDGER_HOME", home)
        .env("RUST_LOG", "off");
    cmd
}

#[test]
fn add_and_summarize() {
    let home = common::temp_base();
    cli(&home)
        .write_stdin(
            "add income 1000 salary Paycheck\nadd expense 900 food \"Fancy dinner\" --date 2024-01-05\nsummary\ntips\nexit\n",
        )
        .assert()
        .success()
        .stdout(contains("Transaction added successfully!"))
        .stdout(contains("$100.00"))
        .stdout(contains("High Spending Alert"))
        .stdout(contains("Food & Dining Spending"));

    let stored = std::fs::read_to_string(home.join("data").join("expenses.json")).unwrap();
    assert!(stored.contains("Fancy dinner"));
    assert!(stored.contains("2024-01-05"));
}

#[test]
fn ledger_persists_between_runs() {
    let home = common::temp_base();
    cli(&home)
        .write_stdin("add expense 12.5 transportation \"Bus pass\" --date 2024-01-05\n")
        .assert()
        .success();
    cli(&home)
        .write_stdin("list\n")
        .assert()
        .success()
        .stdout(contains("Bus pass"))
        .stdout(contains("Jan 5, 2024"))
        .stdout(contains("-$12.50"));
}

#[test]
fn empty_views_show_placeholders() {
    let home = common::temp_base();
    cli(&home)
        .write_stdin("list\nchart\ntips\nclear\n")
        .assert()
        .success()
        .stdout(contains("No transactions yet. Add your first transaction above!"))
        .stdout(contains("No expenses to display"))
        .stdout(contains("Get Started"))
        .stdout(contains("No transactions to clear!"));
}

#[test]
fn clear_needs_explicit_flag_in_script_mode() {
    let home = common::temp_base();
    cli(&home)
        .write_stdin("add expense 5 food Snack\nclear\nlist\n")
        .assert()
        .success()
        .stdout(contains("Clear cancelled"))
        .stdout(contains("Snack"));
    cli(&home)
        .write_stdin("clear --yes\nlist\n")
        .assert()
        .success()
        .stdout(contains("All transactions cleared successfully!"))
        .stdout(contains("No transactions yet"));
}

#[test]
fn bad_input_is_reported_without_aborting() {
    let home = common::temp_base();
    cli(&home)
        .write_stdin("add expense -5 food Oops\nsumary\nlist\n")
        .assert()
        .success()
        .stderr(contains("amount must be zero or positive"))
        .stdout(contains("Unknown command `sumary`"))
        .stdout(contains("Suggestion: `summary`?"))
        .stdout(contains("No transactions yet"));
}

#[test]
fn plain_output_has_no_ansi_codes() {
    let home = common::temp_base();
    cli(&home)
        .write_stdin("add income 10 salary Pay\ndashboard\n")
        .assert()
        .success()
        .stdout(contains("=== Summary ==="))
        .stdout(contains("\u{1b}[").not());
}

#[test]
fn version_and_help_are_available() {
    let home = common::temp_base();
    cli(&home)
        .write_stdin("version\nhelp add\nhelp\n")
        .assert()
        .success()
        .stdout(contains(env!("CARGO_PKG_VERSION")))
        .stdout(contains("Usage: add <income|expense>"))
        .stdout(contains("categories"));
}
