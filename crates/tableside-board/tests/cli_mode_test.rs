/*
[INPUT]:  tableside binary invocations against temporary config files
[OUTPUT]: Verification of init-config and dry-run flows, including env overrides
[POS]:    Integration tests - binary entry point
[UPDATE]: When CLI flags or startup flow change
*/

use std::process::Command;

use tempfile::TempDir;

fn binary() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_tableside"));
    command.env("RUST_LOG", "error");
    command
}

#[test]
fn init_config_then_dry_run_succeeds() {
    let dir = TempDir::new().expect("tempdir");
    let config_path = dir.path().join("tableside").join("config.yaml");

    let init = binary()
        .arg("--config")
        .arg(&config_path)
        .arg("init-config")
        .output()
        .expect("run init-config");
    assert!(
        init.status.success(),
        "init-config failed: {}",
        String::from_utf8_lossy(&init.stderr)
    );
    assert!(config_path.exists());

    let dry_run = binary()
        .arg("--config")
        .arg(&config_path)
        .arg("--dry-run")
        .arg("--log-level")
        .arg("error")
        .output()
        .expect("run dry-run");
    assert!(
        dry_run.status.success(),
        "dry-run failed: {}\nStdout: {}",
        String::from_utf8_lossy(&dry_run.stderr),
        String::from_utf8_lossy(&dry_run.stdout)
    );

    let again = binary()
        .arg("--config")
        .arg(&config_path)
        .arg("init-config")
        .output()
        .expect("run init-config twice");
    assert!(!again.status.success(), "existing config must not be overwritten");
}

#[test]
fn dry_run_rejects_invalid_config() {
    let dir = TempDir::new().expect("tempdir");
    let config_path = dir.path().join("config.yaml");
    std::fs::write(&config_path, "board:\n  poll_interval_secs: 0\n").expect("write config");

    let output = binary()
        .arg("--config")
        .arg(&config_path)
        .arg("--dry-run")
        .output()
        .expect("run dry-run");
    assert!(!output.status.success());
}

#[test]
fn env_override_can_invalidate_config() {
    let dir = TempDir::new().expect("tempdir");
    let config_path = dir.path().join("config.yaml");
    std::fs::write(&config_path, "board:\n  poll_interval_secs: 5\n").expect("write config");

    let output = binary()
        .arg("--config")
        .arg(&config_path)
        .arg("--dry-run")
        .env("TABLESIDE__BOARD__POLL_INTERVAL_SECS", "0")
        .output()
        .expect("run dry-run");
    assert!(!output.status.success(), "zero poll interval from env must be rejected");
}

#[test]
fn env_override_replaces_base_url() {
    let dir = TempDir::new().expect("tempdir");
    let config_path = dir.path().join("config.yaml");
    std::fs::write(&config_path, "api:\n  base_url: ftp://kitchen\n").expect("write config");

    let without_override = binary()
        .arg("--config")
        .arg(&config_path)
        .arg("--dry-run")
        .output()
        .expect("run dry-run");
    assert!(!without_override.status.success());

    let with_override = binary()
        .arg("--config")
        .arg(&config_path)
        .arg("--dry-run")
        .env("TABLESIDE__API__BASE_URL", "https://orders.example.test/")
        .output()
        .expect("run dry-run with override");
    assert!(
        with_override.status.success(),
        "dry-run failed: {}",
        String::from_utf8_lossy(&with_override.stderr)
    );
}
