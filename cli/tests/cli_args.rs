//! CLI tests that never reach the network
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

fn run_beszel(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_beszel"))
        .arg("--config")
        .arg(config)
        .args(args)
        .env_remove("BESZEL_URL")
        .env_remove("BESZEL_TOKEN")
        .output()
        .expect("run beszel")
}

fn run_beszel_with_stdin(config: &Path, args: &[&str], input: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_beszel"))
        .arg("--config")
        .arg(config)
        .args(args)
        .env_remove("BESZEL_URL")
        .env_remove("BESZEL_TOKEN")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn beszel");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(input.as_bytes())
        .expect("write stdin");
    child.wait_with_output().expect("wait beszel")
}

fn text_of(output: &Output) -> String {
    format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}

#[test]
fn test_help_lists_subcommands() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_beszel(&dir.path().join("config.json"), &["--help"]);
    let text = text_of(&output);
    assert!(output.status.success());
    for cmd in ["login", "systems", "stats", "alerts", "alert-history", "records"] {
        assert!(text.contains(cmd), "help text missing {cmd}\n{text}");
    }
}

#[test]
fn test_missing_url_exits_non_zero() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_beszel(&dir.path().join("config.json"), &["systems"]);
    assert!(!output.status.success());
    assert!(text_of(&output).contains("no Beszel URL configured"));
}

#[test]
fn test_config_set_url_then_show() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.json");

    let output = run_beszel(&config, &["config-set-url", "https://hub.example.com"]);
    assert!(output.status.success(), "{}", text_of(&output));

    let output = run_beszel(&config, &["config-show"]);
    let text = text_of(&output);
    assert!(text.contains("https://hub.example.com"));
    assert!(text.contains("Token: not set"));

    let output = run_beszel(&config, &["logout"]);
    assert!(output.status.success());
    assert!(!config.exists());
}

#[test]
fn test_stats_rejects_unknown_record_type() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_beszel(&dir.path().join("config.json"), &["stats", "sys1", "--type", "5m"]);
    assert!(!output.status.success());
    assert!(text_of(&output).contains("unknown record type"));
}

#[test]
fn test_system_delete_declined_makes_no_request() {
    let dir = tempfile::tempdir().unwrap();
    // No URL configured: reaching the hub would fail with a config error
    let output = run_beszel_with_stdin(&dir.path().join("config.json"), &["system-delete", "sys1"], "n\n");
    let text = text_of(&output);
    assert!(output.status.success(), "{text}");
    assert!(String::from_utf8_lossy(&output.stdout).contains("Aborted"));
    assert!(!text.contains("no Beszel URL configured"));
    assert!(!text.contains("System deleted"));
}

#[test]
fn test_alert_delete_declined_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_beszel_with_stdin(&dir.path().join("config.json"), &["alert-delete", "a1"], "\n");
    assert!(output.status.success(), "{}", text_of(&output));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Aborted"));
}

#[test]
fn test_login_reads_piped_password_without_echo() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_beszel_with_stdin(
        &dir.path().join("config.json"),
        &["login", "--server", "http://127.0.0.1:1", "-e", "a@b.c"],
        "s3cret-pw\n",
    );
    let text = text_of(&output);
    assert!(!output.status.success());
    assert!(text.contains("Password:"), "{text}");
    assert!(!text.contains("s3cret-pw"), "{text}");
    assert!(text.contains("Error:"), "{text}");
}
