use std::path::Path;
use std::process::Command;

/// A `quotabar` invocation that sees `home` as the user's home directory.
fn quotabar(home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_quotabar"));
    cmd.env("HOME", home).env_remove("XDG_CONFIG_HOME");
    cmd
}

#[test]
fn help_exits_successfully() {
    // Arrange
    let home = tempfile::tempdir().unwrap();
    let mut cmd = quotabar(home.path());
    cmd.arg("--help");

    // Act
    let output = cmd.output().expect("failed to execute quotabar");

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("usage quotas"));
    assert!(stdout.contains("doctor"));
}

#[test]
fn version_exits_successfully() {
    // Arrange
    let home = tempfile::tempdir().unwrap();
    let mut cmd = quotabar(home.path());
    cmd.arg("--version");

    // Act
    let output = cmd.output().expect("failed to execute quotabar");

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("quotabar"));
}

#[test]
fn plain_mode_cookie_failure_exits_with_error() {
    // Arrange
    let home = tempfile::tempdir().unwrap();
    let mut cmd = quotabar(home.path());
    cmd.args(["claude", "--browser", "netscape"]);

    // Act
    let output = cmd.output().expect("failed to execute quotabar");

    // Assert
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains(
            "[!] Critical Error: Failed to read cookies for claude.ai: netscape: unsupported browser"
        ),
        "{stderr}"
    );
}

#[test]
fn waybar_mode_cookie_failure_prints_error_card() {
    // Arrange
    let home = tempfile::tempdir().unwrap();
    let mut cmd = quotabar(home.path());
    cmd.args(["codex", "--waybar", "--browser", "netscape"]);

    // Act
    let output = cmd.output().expect("failed to execute quotabar");

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let card: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(card["class"], "critical");
    assert!(card["text"].as_str().unwrap().contains("Net Err"));
    assert!(
        card["tooltip"]
            .as_str()
            .unwrap()
            .starts_with("Error:\n")
    );
}

#[test]
fn browsers_from_config_are_used_without_flag() {
    // Arrange
    let home = tempfile::tempdir().unwrap();
    let dir = home.path().join(".config").join("quotabar");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.toml"), "browsers = [\"Lynx\"]\n").unwrap();
    let mut cmd = quotabar(home.path());
    cmd.arg("claude");

    // Act
    let output = cmd.output().expect("failed to execute quotabar");

    // Assert
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("lynx: unsupported browser"), "{stderr}");
}

#[test]
fn init_creates_config_once() {
    // Arrange
    let home = tempfile::tempdir().unwrap();
    let config = home.path().join(".config/quotabar/config.toml");

    // Act
    let first = quotabar(home.path()).arg("init").output().unwrap();
    let second = quotabar(home.path()).arg("init").output().unwrap();

    // Assert
    assert!(first.status.success());
    assert!(config.is_file());
    assert!(String::from_utf8_lossy(&first.stdout).contains("Created"));
    assert!(second.status.success());
    assert!(String::from_utf8_lossy(&second.stdout).contains("Already exists"));
}

#[test]
fn doctor_runs_without_config() {
    // Arrange
    let home = tempfile::tempdir().unwrap();
    let mut cmd = quotabar(home.path());
    cmd.arg("doctor");

    // Act
    let output = cmd.output().expect("failed to execute quotabar");

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("config.toml not found"), "{stdout}");
    assert!(stdout.contains("firefox"), "{stdout}");
}
