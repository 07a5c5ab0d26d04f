use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// A scratch home for one invocation: its own config file and log directory,
/// and no server settings leaking in from the environment.
struct TestEnv {
    dir: TempDir,
}

impl TestEnv {
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    fn write_config(&self, content: &str) {
        fs::write(self.dir.path().join("config.toml"), content).expect("Failed to write config");
    }

    #[allow(deprecated)]
    fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("rat").expect("Failed to find rat binary");
        cmd.env_remove("RAT_SERVER")
            .env_remove("RAT_TOKEN")
            .env_remove("RAT_LOG")
            .env("RAT_LOG_DIR", self.dir.path().join("logs"))
            .arg("--config")
            .arg(self.dir.path().join("config.toml"));
        cmd
    }
}

#[test]
fn test_help_lists_subcommands() {
    let env = TestEnv::new();
    env.command()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("open"))
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("--server"));
}

#[test]
fn test_version() {
    let env = TestEnv::new();
    env.command()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("rat "));
}

#[test]
fn test_rejects_unknown_log_level() {
    let env = TestEnv::new();
    env.command()
        .args(["--log-level", "chatty", "index"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("chatty"));
}

#[test]
fn test_invalid_server_url_in_config() {
    let env = TestEnv::new();
    env.write_config("[server]\nurl = \"ftp://graph.local\"\n");
    env.command()
        .arg("index")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("server.url"));
}

#[test]
fn test_server_flag_overrides_config() {
    let env = TestEnv::new();
    env.write_config("[server]\nurl = \"ftp://graph.local\"\n");
    // Valid URL from the flag gets past validation; the name check fails
    // before any request is made.
    env.command()
        .args(["--server", "http://127.0.0.1:9", "new", "notes", "  "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("node name must not be empty"));
}

#[test]
fn test_rm_refuses_root() {
    let env = TestEnv::new();
    env.command()
        .args(["rm", "/"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("refusing to delete the root node"));
}

#[test]
fn test_open_requires_terminal() {
    let env = TestEnv::new();
    env.command()
        .arg("open")
        .assert()
        .failure()
        .stderr(predicate::str::contains("interactive terminal"));
}

#[test]
fn test_malformed_config_is_reported() {
    let env = TestEnv::new();
    env.write_config("[server\nurl = 1\n");
    env.command()
        .arg("index")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}
