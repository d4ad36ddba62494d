use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn help_lists_resource_subcommands() {
    let mut cmd = Command::cargo_bin("gestock-cli").expect("binary builds");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("auth"))
        .stdout(predicate::str::contains("article"))
        .stdout(predicate::str::contains("commande-client"))
        .stdout(predicate::str::contains("entreprise"));
}

#[test]
fn version_flag_works() {
    let mut cmd = Command::cargo_bin("gestock-cli").expect("binary builds");
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("gestock-cli"));
}

#[test]
fn unknown_subcommand_fails() {
    let mut cmd = Command::cargo_bin("gestock-cli").expect("binary builds");
    cmd.arg("warehouse").assert().failure();
}

#[test]
fn config_show_uses_isolated_config_dir() {
    let dir = tempdir().expect("temp dir");
    let mut cmd = Command::cargo_bin("gestock-cli").expect("binary builds");
    cmd.arg("--config-dir")
        .arg(dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Current Configuration"));
}

#[test]
fn config_set_rejects_invalid_url() {
    let dir = tempdir().expect("temp dir");
    let mut cmd = Command::cargo_bin("gestock-cli").expect("binary builds");
    cmd.arg("--config-dir")
        .arg(dir.path())
        .args(["config", "set", "api_url", "not-a-url"])
        .assert()
        .failure();
}
