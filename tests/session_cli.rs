//! Drives the `finledger` binary through stdin

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn finledger(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("finledger").unwrap();
    cmd.env("FINLEDGER_CONFIG_DIR", config_dir.path())
        .env("RUST_LOG", "off");
    cmd
}

#[test]
fn records_an_expense_and_lists_accounts() {
    let config_dir = TempDir::new().unwrap();
    let script = "account create Main 1000\n\
                  category create expense Food\n\
                  expense Main 500 Food lunch\n\
                  account list\n\
                  quit\n";

    finledger(&config_dir)
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Created account: Main"))
        .stdout(predicate::str::contains("Recorded expense of 500 (lunch)"))
        .stdout(predicate::str::contains("Total: 500"));
}

#[test]
fn errors_do_not_end_the_session() {
    let config_dir = TempDir::new().unwrap();
    let script = "expense Ghost 5 Food\n\
                  account create Main zero\n\
                  account create Main 0\n";

    finledger(&config_dir)
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Error: Account not found: Ghost"))
        .stdout(predicate::str::contains("Error: Validation error: Invalid balance"))
        .stdout(predicate::str::contains("Created account: Main"));
}

#[test]
fn exports_and_reimports_categories() {
    let config_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let path = out_dir.path().join("categories.json");
    let path = path.to_str().unwrap();

    finledger(&config_dir)
        .write_stdin(format!(
            "category create income Salary\nexport categories json \"{}\"\n",
            path
        ))
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 categories"));

    let written = std::fs::read_to_string(path).unwrap();
    assert!(written.contains("\"type\": \"INCOME\""));

    finledger(&config_dir)
        .write_stdin(format!("import categories json \"{}\"\ncategory list\n", path))
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 categories"))
        .stdout(predicate::str::contains("Salary"));
}

#[test]
fn settings_pick_the_default_format() {
    let config_dir = TempDir::new().unwrap();
    std::fs::write(
        config_dir.path().join("config.json"),
        r#"{"default_format": "csv"}"#,
    )
    .unwrap();
    let out_dir = TempDir::new().unwrap();
    let path = out_dir.path().join("accounts.out");

    finledger(&config_dir)
        .write_stdin(format!(
            "account create Main 3\nexport accounts \"{}\"\n",
            path.display()
        ))
        .assert()
        .success();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("id,name,balance\n"));
}

#[test]
fn help_lists_commands() {
    let config_dir = TempDir::new().unwrap();

    finledger(&config_dir)
        .write_stdin("help\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("expense"))
        .stdout(predicate::str::contains("import"));
}

#[test]
fn first_run_writes_default_settings() {
    let config_dir = TempDir::new().unwrap();
    let settings_file = config_dir.path().join("config.json");
    assert!(!settings_file.exists());

    finledger(&config_dir).write_stdin("quit\n").assert().success();

    let written = std::fs::read_to_string(&settings_file).unwrap();
    assert!(written.contains("\"default_format\": \"json\""));
    assert!(written.contains("\"log_filter\": \"finance_ledger=info\""));
}

#[test]
fn log_filter_flag_overrides_rust_log() {
    let config_dir = TempDir::new().unwrap();

    finledger(&config_dir)
        .args(["--log-filter", "finance_ledger=info"])
        .write_stdin("account list\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("command finished"));

    finledger(&config_dir)
        .write_stdin("account list\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("command finished").not());
}
