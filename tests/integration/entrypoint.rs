use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn maintenance_failure_exits_nonzero_with_diagnostic() {
    let empty_path = tempdir().expect("failed to create tempdir");

    // With an empty PATH the certificate refresh cannot even spawn, which
    // must abort the container before any service launches.
    Command::new(assert_cmd::cargo::cargo_bin!("warden"))
        .env("PATH", empty_path.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("update-ca-certificates"));
}

#[test]
fn help_prints_usage() {
    Command::new(assert_cmd::cargo::cargo_bin!("warden"))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("entrypoint supervisor"));
}

#[test]
fn invalid_log_level_is_rejected() {
    Command::new(assert_cmd::cargo::cargo_bin!("warden"))
        .arg("--log-level")
        .arg("loud")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid log level"));
}
