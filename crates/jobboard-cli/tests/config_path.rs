use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_config_path_command() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("jobboard")
        .env("JOBBOARD_HOME", dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_init_creates_file() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    assert!(!config_path.exists());

    cargo_bin_cmd!("jobboard")
        .env("JOBBOARD_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config at"));

    assert!(config_path.exists());

    let contents = fs::read_to_string(&config_path).unwrap();
    assert!(contents.contains("base_url ="));
    assert!(contents.contains("page_size = 12"));
}

#[test]
fn test_config_init_fails_if_exists() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    fs::write(&config_path, "# existing config").unwrap();

    cargo_bin_cmd!("jobboard")
        .env("JOBBOARD_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_config_path_works_with_broken_config() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("config.toml"), "[api\nbase_url = ").unwrap();

    cargo_bin_cmd!("jobboard")
        .env("JOBBOARD_HOME", dir.path())
        .args(["config", "path"])
        .assert()
        .success();
}

#[test]
fn test_broken_config_fails_other_commands() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("config.toml"), "[api\nbase_url = ").unwrap();

    cargo_bin_cmd!("jobboard")
        .env("JOBBOARD_HOME", dir.path())
        .env_remove("JOBBOARD_API_URL")
        .args(["jobs", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("load config"));
}
