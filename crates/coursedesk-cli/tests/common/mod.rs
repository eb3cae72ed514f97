use std::path::{Path, PathBuf};
use std::process::Output;

use tokio::process::Command;

/// Run the CLI against `api` with `home` as its isolated home directory.
pub async fn run_cli(args: &[&str], home: &Path, api: &str) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_coursedesk"));
    cmd.args(args);
    cmd.env("HOME", home);
    cmd.env("XDG_DATA_HOME", home.join("data"));
    cmd.env("COURSEDESK_API", api);
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("COURSEDESK_LOCALE");
    cmd.env_remove("COURSEDESK_PASSWORD");
    cmd.env_remove("RUST_LOG");
    cmd.output().await.expect("Failed to execute CLI")
}

/// Run the CLI and expect success; returns stdout.
pub async fn run_cli_success(args: &[&str], home: &Path, api: &str) -> String {
    let output = run_cli(args, home, api).await;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run the CLI and expect failure; returns stderr.
pub async fn run_cli_failure(args: &[&str], home: &Path, api: &str) -> String {
    let output = run_cli(args, home, api).await;
    if output.status.success() {
        let stdout = String::from_utf8_lossy(&output.stdout);
        panic!("CLI command should have failed: {:?}\nstdout: {}", args, stdout);
    }
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Where the CLI keeps its session inside `home`.
pub fn session_file(home: &Path) -> PathBuf {
    home.join("data").join("coursedesk").join("session.json")
}
