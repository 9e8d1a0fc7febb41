use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::tempdir;

fn cli(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("pocket_ledger_cli").unwrap();
    cmd.env("POCKET_LEDGER_CLI_SCRIPT", "1")
        .env("POCKET_LEDGER_HOME", home)
        .env("RUST_LOG", "off");
    cmd
}

#[test]
fn script_mode_runs_basic_flow() {
    let home = tempdir().unwrap();
    cli(home.path())
        .write_stdin(
            "add income 1234.5 2024-01-01 Salary\n\
             add expense 40 2024-01-02 Rent\n\
             list\n\
             exit\n",
        )
        .assert()
        .success()
        .stdout(contains("Salary"))
        .stdout(contains("1 234,50 TND"))
        .stdout(contains("Balance: 1 194,50 TND"));

    let stored =
        std::fs::read_to_string(home.path().join("store").join("transactions.json")).unwrap();
    assert!(stored.contains("\"Rent\""));
}

#[test]
fn ledger_persists_between_runs() {
    let home = tempdir().unwrap();
    cli(home.path())
        .write_stdin("add expense 12 2024-03-03 Books\n")
        .assert()
        .success();

    cli(home.path())
        .write_stdin("delete 1\nlist\n")
        .assert()
        .success()
        .stdout(contains("Deleted row 1."))
        .stdout(contains("No transactions yet."));
}

#[test]
fn rejected_input_is_reported_and_the_shell_continues() {
    let home = tempdir().unwrap();
    cli(home.path())
        .write_stdin("add expense abc\nadd expense 0\nsumary\nlist\n")
        .assert()
        .success()
        .stdout(contains("Transaction rejected: amount `abc` is not a number"))
        .stdout(contains("must be greater than 0"))
        .stdout(contains("Did you mean `summary`?"))
        .stdout(contains("No transactions yet."));
}

#[test]
fn summary_prints_chart_and_config_changes_apply() {
    let home = tempdir().unwrap();
    cli(home.path())
        .write_stdin(
            "add income 100 2024-01-01\n\
             config set chart_width 10\n\
             config set currency_suffix EUR\n\
             summary\n",
        )
        .assert()
        .success()
        .stdout(contains("Income : 100,00 EUR"))
        .stdout(contains("Amounts (EUR)"))
        .stdout(contains("Income  |########## 100.00"))
        .stdout(contains("\u{1b}[").not());

    let config = std::fs::read_to_string(home.path().join("config.json")).unwrap();
    assert!(config.contains("\"chart_width\": 10"));
}

#[test]
fn theme_toggle_is_remembered() {
    let home = tempdir().unwrap();
    cli(home.path())
        .write_stdin("theme\n")
        .assert()
        .success()
        .stdout(contains("Theme set to light"));

    cli(home.path())
        .write_stdin("theme\n")
        .assert()
        .success()
        .stdout(contains("Theme set to dark"));
}
