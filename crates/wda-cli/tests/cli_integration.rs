//! CLI integration tests
//!
//! Tests the wda-lifecycle CLI using assert_cmd.

use std::net::TcpListener;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn wda_lifecycle() -> Command {
    let mut cmd = Command::cargo_bin("wda-lifecycle")
        .expect("Failed to locate wda-lifecycle binary - ensure it's built before running tests");
    for var in ["WDA_BASE_URL", "WDA_LOCAL_PORT", "WDA_URL", "RUST_LOG"] {
        cmd.env_remove(var);
    }
    cmd
}

/// Write `contents` as a config file in a fresh temp dir
fn config_file(contents: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, contents).unwrap();
    (dir, path)
}

/// A localhost port nothing is listening on
fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

#[test]
fn test_cli_help() {
    wda_lifecycle()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("WebDriverAgent lifecycle inspector"));
}

#[test]
fn test_cli_version() {
    wda_lifecycle()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("wda-lifecycle"));
}

#[test]
fn test_url_default() {
    let (_dir, path) = config_file("");
    wda_lifecycle()
        .args(["--config", path.to_str().unwrap(), "url"])
        .assert()
        .success()
        .stdout("http://localhost:8100/\n");
}

#[test]
fn test_url_from_config_file() {
    let (_dir, path) = config_file("wdaBaseUrl = \"http://mockurl/\"\nwdaLocalPort = \"9100\"\n");
    wda_lifecycle()
        .args(["--config", path.to_str().unwrap(), "url"])
        .assert()
        .success()
        .stdout("http://mockurl:9100/\n");
}

#[test]
fn test_url_flags_override_config_file() {
    let (_dir, path) = config_file("wdaLocalPort = 9000\n");
    wda_lifecycle()
        .args([
            "--config",
            path.to_str().unwrap(),
            "--wda-base-url",
            "http://mockurl",
            "--wda-local-port",
            "9100",
            "url",
        ])
        .assert()
        .success()
        .stdout("http://mockurl:9100/\n");
}

#[test]
fn test_url_override_is_verbatim() {
    let (_dir, path) = config_file("");
    wda_lifecycle()
        .args([
            "--config",
            path.to_str().unwrap(),
            "--wda-local-port",
            "9100",
            "--webdriveragent-url",
            "http://mockurl:8100/",
            "url",
        ])
        .assert()
        .success()
        .stdout("http://mockurl:8100/\n");
}

#[test]
fn test_missing_explicit_config_fails() {
    wda_lifecycle()
        .args(["--config", "/nonexistent/wda/config.toml", "url"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"));
}

#[test]
fn test_config_path_prints_given_path() {
    wda_lifecycle()
        .args(["--config", "/tmp/wda-config.toml", "config", "path"])
        .assert()
        .success()
        .stdout("/tmp/wda-config.toml\n");
}

#[test]
fn test_config_init_then_url() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    let path_arg = path.to_str().unwrap();

    wda_lifecycle()
        .args([
            "--config",
            path_arg,
            "--wda-base-url",
            "http://mockurl/",
            "--wda-local-port",
            "9100",
            "config",
            "init",
        ])
        .assert()
        .success();

    wda_lifecycle()
        .args(["--config", path_arg, "url"])
        .assert()
        .success()
        .stdout("http://mockurl:9100/\n");

    wda_lifecycle()
        .args(["--config", path_arg, "config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_status_when_nothing_listens() {
    let (_dir, path) = config_file("");
    let port = closed_port().to_string();
    wda_lifecycle()
        .args([
            "--config",
            path.to_str().unwrap(),
            "--wda-local-port",
            &port,
            "status",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("No WebDriverAgent running"));
}

#[test]
fn test_check_when_nothing_listens() {
    let (dir, path) = config_file("");
    let port = closed_port().to_string();
    wda_lifecycle()
        .env("WDA_BOOTSTRAP_PATH", dir.path())
        .args([
            "--config",
            path.to_str().unwrap(),
            "--wda-local-port",
            &port,
            "check",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("no agent is running"));
}
