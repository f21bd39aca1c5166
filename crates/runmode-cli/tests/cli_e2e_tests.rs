//! CLI end-to-end tests that invoke the compiled `runmodes` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// A `runmodes` command isolated from the caller's environment.
fn runmodes(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("runmodes").unwrap();
    cmd.env("NO_COLOR", "1")
        .env_remove("RUNMODE_RUN_MODES")
        .env_remove("RUNMODE_RUN_MODE_OPTIONS")
        .env_remove("RUNMODE_RUN_MODE_INSTALL_OPTIONS")
        .env_remove("RUNMODE_INSTANCE_NAME")
        .env_remove("RUNMODE_INSTANCE_DESCRIPTION")
        .env("RUNMODE_HOME", home.path());
    cmd
}

#[test]
fn test_help_exits_zero() {
    let home = TempDir::new().unwrap();
    runmodes(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("match"));
}

#[test]
fn test_no_command_prints_hint() {
    let home = TempDir::new().unwrap();
    runmodes(&home)
        .assert()
        .success()
        .stdout(predicate::str::contains("runmodes --help"));
}

#[test]
fn test_list_without_modes() {
    let home = TempDir::new().unwrap();
    runmodes(&home)
        .arg("list")
        .assert()
        .success()
        .stdout("Current Run Modes: -\n");
}

#[test]
fn test_list_with_modes_flag() {
    let home = TempDir::new().unwrap();
    runmodes(&home)
        .args(["list", "--modes", "publish, dev"])
        .assert()
        .success()
        .stdout("Current Run Modes: [dev, publish]\n");
}

#[test]
fn test_environment_overrides_settings_file() {
    let home = TempDir::new().unwrap();
    fs::write(
        home.path().join("settings.toml"),
        "[run-modes]\nmodes = \"author\"\n",
    )
    .unwrap();

    runmodes(&home)
        .arg("list")
        .assert()
        .success()
        .stdout("Current Run Modes: [author]\n");

    runmodes(&home)
        .arg("list")
        .env("RUNMODE_RUN_MODES", "publish")
        .assert()
        .success()
        .stdout("Current Run Modes: [publish]\n");
}

#[test]
fn test_install_options_stable_across_runs() {
    let home = TempDir::new().unwrap();

    runmodes(&home)
        .args(["list", "--modes", "foo,bar,c,e,f,a", "--install-options", "a,b,c|d,e,f"])
        .assert()
        .success()
        .stdout("Current Run Modes: [a, bar, e, foo]\n");

    runmodes(&home)
        .args([
            "list",
            "--modes",
            "foo,doo,a,b,c,d,e,f,waa",
            "--install-options",
            "a,b,c|d,e,f",
        ])
        .assert()
        .success()
        .stdout("Current Run Modes: [a, doo, e, foo, waa]\n");
}

#[test]
fn test_status_reports_instance() {
    let home = TempDir::new().unwrap();
    fs::write(
        home.path().join("settings.toml"),
        "[instance]\nname = \"author-1\"\n\n[run-modes]\nmodes = \"author\"\n",
    )
    .unwrap();

    runmodes(&home)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Run Mode Settings\n"))
        .stdout(predicate::str::contains("Instance Name = author-1"))
        .stdout(predicate::str::contains("Run Modes = [author]"));
}

#[test]
fn test_status_json_is_parseable() {
    let home = TempDir::new().unwrap();
    let output = runmodes(&home)
        .args(["status", "--json", "--options", "oak_tar,oak_mongo"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["run_modes"], serde_json::json!(["oak_tar"]));
}

#[test]
fn test_match_single_spec() {
    let home = TempDir::new().unwrap();
    runmodes(&home)
        .args(["--modes", "test1,test2", "match", "test1.test2,-test3.test4"])
        .assert()
        .success()
        .stdout("2\n");
}

#[test]
fn test_match_ranks_specs() {
    let home = TempDir::new().unwrap();
    runmodes(&home)
        .args(["--modes", "author,dev", "match", "author", "author.dev", "publish"])
        .assert()
        .success()
        .stdout(predicate::str::contains("*   2  author.dev"));
}

#[test]
fn test_corrupt_options_record_is_fatal() {
    let home = TempDir::new().unwrap();
    fs::create_dir_all(home.path().join("data")).unwrap();
    fs::write(home.path().join("data/install-options.toml"), "\u{0}\u{1}broken").unwrap();

    runmodes(&home)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Storage error"));
}

#[test]
fn test_invalid_settings_file_is_reported() {
    let home = TempDir::new().unwrap();
    fs::write(home.path().join("settings.toml"), "[run-modes\n").unwrap();

    runmodes(&home)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid settings"));
}

#[test]
fn test_properties_overlay_file_with_environment() {
    let home = TempDir::new().unwrap();
    fs::write(
        home.path().join("settings.toml"),
        "[run-modes]\nmodes = \"author\"\n\n[properties]\n\"http.port\" = \"4502\"\n",
    )
    .unwrap();

    runmodes(&home)
        .env("RUNMODE_RUN_MODES", "publish")
        .arg("properties")
        .assert()
        .success()
        .stdout("Launch Properties\n\nhttp.port = 4502\nrun.modes = publish\n");
}

#[test]
fn test_status_reports_home_url() {
    let home = TempDir::new().unwrap();
    runmodes(&home)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Home URL = file:///"));
}
