use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn fixture_text(name: &str) -> String {
    fs::read_to_string(fixture(name)).unwrap()
}

/// Template directory with both templates and `AGENTS.md` in `primary` language.
fn workspace(primary: Option<&str>) -> TempDir {
    let dir = TempDir::new().unwrap();
    for name in ["AGENTS.md.en", "AGENTS.md.ja"] {
        fs::copy(fixture(name), dir.path().join(name)).unwrap();
    }
    if let Some(lang) = primary {
        fs::copy(
            fixture(&format!("AGENTS.md.{lang}")),
            dir.path().join("AGENTS.md"),
        )
        .unwrap();
    }
    dir
}

fn isolate(cmd: &mut Command, home: &Path) {
    cmd.env("HOME", home)
        .env("AGENTS_MD_LANG", "en")
        .env_remove("USERPROFILE")
        .env_remove("LC_ALL")
        .env_remove("LC_MESSAGES")
        .env_remove("LANGUAGE")
        .env_remove("LANG")
        .env_remove("AGENTS_MD_LOG");
}

fn setup_cmd(home: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("agents-md-setup");
    isolate(&mut cmd, home);
    cmd
}

fn lang_cmd(home: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("agents-md-lang");
    isolate(&mut cmd, home);
    cmd
}

fn read(path: impl AsRef<Path>) -> String {
    fs::read_to_string(path).unwrap()
}

// === Help and version ===
#[test]
fn test_help() {
    let home = TempDir::new().unwrap();
    setup_cmd(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("--memory-path"));
}

#[test]
fn test_help_in_japanese() {
    let home = TempDir::new().unwrap();
    setup_cmd(home.path())
        .args(["--lang", "ja", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("MEMORY_PATH を設定"));
}

#[test]
fn test_version() {
    let home = TempDir::new().unwrap();
    setup_cmd(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("agents-md-setup"));
}

#[test]
fn test_switcher_help_follows_environment() {
    let home = TempDir::new().unwrap();
    lang_cmd(home.path())
        .env("AGENTS_MD_LANG", "ja")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("英語と日本語で切り替え"));
}

// === Standalone switcher ===
#[test]
fn test_switcher_without_argument_prints_language_and_usage() {
    let home = TempDir::new().unwrap();
    let dir = workspace(Some("en"));
    lang_cmd(home.path())
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Current language: EN"))
        .stdout(predicate::str::contains("agents-md-lang ja"));
}

#[test]
fn test_switcher_without_target_file() {
    let home = TempDir::new().unwrap();
    let dir = workspace(None);
    lang_cmd(home.path())
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "AGENTS.md not found or language cannot be detected.",
        ));
}

#[test]
fn test_switcher_switches_and_reports_backup() {
    let home = TempDir::new().unwrap();
    let dir = workspace(Some("en"));
    lang_cmd(home.path())
        .arg("ja")
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("JA に切り替えました"))
        .stdout(predicate::str::contains("AGENTS.md.backup"));

    assert_eq!(read(dir.path().join("AGENTS.md")), fixture_text("AGENTS.md.ja"));
    assert_eq!(read(dir.path().join("GEMINI.md")), fixture_text("AGENTS.md.ja"));
    assert_eq!(
        read(dir.path().join("AGENTS.md.backup")),
        fixture_text("AGENTS.md.en")
    );
}

#[test]
fn test_switcher_rejects_invalid_language() {
    let home = TempDir::new().unwrap();
    let dir = workspace(Some("en"));
    lang_cmd(home.path())
        .arg("fr")
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Invalid language 'fr'"));
    assert_eq!(read(dir.path().join("AGENTS.md")), fixture_text("AGENTS.md.en"));
}

#[test]
fn test_switcher_rejects_language_prefixes() {
    let home = TempDir::new().unwrap();
    for raw in ["jazz", "enormous", "en-US"] {
        let dir = workspace(Some("en"));
        lang_cmd(home.path())
            .arg(raw)
            .arg("--dir")
            .arg(dir.path())
            .assert()
            .failure()
            .code(1)
            .stdout(predicate::str::contains(format!("Invalid language '{raw}'")));
        assert_eq!(read(dir.path().join("AGENTS.md")), fixture_text("AGENTS.md.en"));
    }
}

#[test]
fn test_switcher_missing_template_fails() {
    let home = TempDir::new().unwrap();
    let dir = workspace(Some("en"));
    fs::remove_file(dir.path().join("AGENTS.md.ja")).unwrap();
    lang_cmd(home.path())
        .arg("ja")
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("AGENTS.md.ja"));
}

#[test]
fn test_switcher_round_trip_preserves_path() {
    let home = TempDir::new().unwrap();
    let dir = workspace(Some("ja"));
    let memory = dir.path().join("mem");

    setup_cmd(home.path())
        .arg("--dir")
        .arg(dir.path())
        .args(["--lang", "ja", "-y", "--memory-path"])
        .arg(&memory)
        .assert()
        .success();
    let configured = read(dir.path().join("AGENTS.md"));

    for lang in ["en", "ja"] {
        lang_cmd(home.path())
            .arg(lang)
            .arg("--dir")
            .arg(dir.path())
            .assert()
            .success();
    }

    assert_eq!(read(dir.path().join("AGENTS.md")), configured);
    assert!(configured.contains(&format!("**MEMORY_PATH**: `{}`", memory.display())));
}

// === Interactive setup ===
#[test]
fn test_setup_interactive_language_only() {
    let home = TempDir::new().unwrap();
    let dir = workspace(Some("en"));
    setup_cmd(home.path())
        .arg("--dir")
        .arg(dir.path())
        .write_stdin("2\nno\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Found configuration file: AGENTS.md"))
        .stdout(predicate::str::contains("言語を JA に切り替えました"));

    assert_eq!(read(dir.path().join("AGENTS.md")), fixture_text("AGENTS.md.ja"));
}

#[test]
fn test_setup_interactive_full_run() {
    let home = TempDir::new().unwrap();
    let dir = workspace(Some("ja"));
    let memory = dir.path().join("AI Memory");
    let input = format!("en\nyes\n{}\nyes\nyes\n", memory.display());

    setup_cmd(home.path())
        .arg("--dir")
        .arg(dir.path())
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Created directory"))
        .stdout(predicate::str::contains("Replaced 3 occurrence(s)"))
        .stdout(predicate::str::contains("Configuration complete!"));

    assert!(memory.is_dir());
    let primary = read(dir.path().join("AGENTS.md"));
    assert!(primary.starts_with("# Memory System Guidelines"));
    assert!(!primary.contains("{MEMORY_PATH}"));
    assert_eq!(read(dir.path().join("GEMINI.md")), primary);
    assert_eq!(
        read(dir.path().join("AGENTS.md.backup")),
        fixture_text("AGENTS.md.ja")
    );
}

#[test]
fn test_setup_invalid_lang_flag_shows_menu() {
    let home = TempDir::new().unwrap();
    for raw in ["jazz", "enormous", "en-US"] {
        let dir = workspace(Some("en"));
        setup_cmd(home.path())
            .arg("--dir")
            .arg(dir.path())
            .args(["--lang", raw])
            .write_stdin("1\nno\n")
            .assert()
            .success()
            .stdout(predicate::str::contains(format!(
                "Warning: Invalid language '{raw}'"
            )))
            .stdout(predicate::str::contains("Select language:"));
        assert_eq!(read(dir.path().join("AGENTS.md")), fixture_text("AGENTS.md.en"));
    }
}

#[test]
fn test_setup_uses_wip_when_primary_missing() {
    let home = TempDir::new().unwrap();
    let dir = workspace(None);
    fs::copy(fixture("AGENTS.md.en"), dir.path().join("AGENTS.md.wip")).unwrap();

    setup_cmd(home.path())
        .arg("--dir")
        .arg(dir.path())
        .args(["--lang", "en"])
        .write_stdin("no\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Found configuration file: AGENTS.md.wip"))
        .stdout(predicate::str::contains("Created GEMINI.md"));

    assert_eq!(read(dir.path().join("AGENTS.md")), fixture_text("AGENTS.md.en"));
}

#[test]
fn test_setup_fails_without_target() {
    let home = TempDir::new().unwrap();
    let dir = workspace(None);
    setup_cmd(home.path())
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Could not find AGENTS.md file."));
}

#[test]
fn test_setup_fails_without_template() {
    let home = TempDir::new().unwrap();
    let dir = workspace(Some("en"));
    fs::remove_file(dir.path().join("AGENTS.md.en")).unwrap();
    setup_cmd(home.path())
        .arg("--dir")
        .arg(dir.path())
        .args(["--lang", "en"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Source file 'AGENTS.md.en' not found."));
}

#[test]
fn test_setup_end_of_input_is_cancelled() {
    let home = TempDir::new().unwrap();
    let dir = workspace(Some("en"));
    setup_cmd(home.path())
        .arg("--dir")
        .arg(dir.path())
        .write_stdin("")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Operation cancelled by user."));
    assert_eq!(read(dir.path().join("AGENTS.md")), fixture_text("AGENTS.md.en"));
}

#[test]
fn test_setup_cancel_notice_follows_document_language() {
    let home = TempDir::new().unwrap();
    let dir = workspace(Some("ja"));
    setup_cmd(home.path())
        .arg("--dir")
        .arg(dir.path())
        .write_stdin("")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "\nユーザーによって操作がキャンセルされました。",
        ));
}

#[test]
fn test_setup_json_summary() {
    let home = TempDir::new().unwrap();
    let dir = workspace(Some("en"));
    let memory = dir.path().join("mem");

    let assert = setup_cmd(home.path())
        .arg("--dir")
        .arg(dir.path())
        .args(["--lang", "en", "--yes", "--json", "--memory-path"])
        .arg(&memory)
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let summary: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(summary["language"], "en");
    assert_eq!(summary["memory_path"], memory.display().to_string().as_str());
    assert_eq!(summary["primary_updated"], true);
    assert_eq!(summary["mirror_status"], "updated");
    assert_eq!(summary["backups"].as_array().unwrap().len(), 0);
}

#[test]
fn test_setup_is_idempotent() {
    let home = TempDir::new().unwrap();
    let dir = workspace(Some("en"));
    let memory = dir.path().join("mem");

    let run = || {
        setup_cmd(home.path())
            .arg("--dir")
            .arg(dir.path())
            .args(["--lang", "en", "-y", "--memory-path"])
            .arg(&memory)
            .assert()
            .success();
        read(dir.path().join("AGENTS.md"))
    };

    let once = run();
    let twice = run();
    assert_eq!(once, twice);
}

#[test]
fn test_setup_uses_configured_file_names() {
    let home = TempDir::new().unwrap();
    let dir = workspace(Some("en"));

    setup_cmd(home.path())
        .args(["config", "set", "mirror", "CLAUDE.md"])
        .assert()
        .success();

    setup_cmd(home.path())
        .arg("--dir")
        .arg(dir.path())
        .args(["--lang", "en"])
        .write_stdin("no\n")
        .assert()
        .success();

    assert!(dir.path().join("CLAUDE.md").is_file());
    assert!(!dir.path().join("GEMINI.md").exists());
}

// === config command ===
#[test]
fn test_config_path() {
    let home = TempDir::new().unwrap();
    setup_cmd(home.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".agents-md"))
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_set_get_list_reset() {
    let home = TempDir::new().unwrap();

    setup_cmd(home.path())
        .args(["config", "set", "language", "ja"])
        .assert()
        .success()
        .stdout(predicate::str::contains("language = ja"));

    setup_cmd(home.path())
        .args(["config", "get", "language"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ja"));

    setup_cmd(home.path())
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("primary = AGENTS.md"));

    setup_cmd(home.path())
        .args(["config", "reset"])
        .assert()
        .success();

    setup_cmd(home.path())
        .args(["config", "get", "language"])
        .assert()
        .success()
        .stdout(predicate::str::contains("auto"));
}

#[test]
fn test_config_files_resolves_against_dir() {
    let home = TempDir::new().unwrap();
    let dir = workspace(Some("ja"));
    let primary = dir.path().join("AGENTS.md");

    setup_cmd(home.path())
        .args(["config", "files", "--dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "primary = {} [ja]",
            primary.display()
        )))
        .stdout(predicate::str::contains("[missing]"));
}

#[test]
fn test_config_set_invalid_language() {
    let home = TempDir::new().unwrap();
    setup_cmd(home.path())
        .args(["config", "set", "language", "fr"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid language value"));
}

#[test]
fn test_config_get_unknown_key() {
    let home = TempDir::new().unwrap();
    setup_cmd(home.path())
        .args(["config", "get", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown config key: nope"));
}

#[test]
fn test_invalid_config_still_runs_setup() {
    let home = TempDir::new().unwrap();
    let config_dir = home.path().join(".agents-md");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.toml"), "[files\n").unwrap();
    let dir = workspace(Some("en"));

    setup_cmd(home.path())
        .arg("--dir")
        .arg(dir.path())
        .args(["--lang", "ja"])
        .write_stdin("no\n")
        .assert()
        .success();
}

// === completions ===
#[test]
fn test_completions_bash() {
    let home = TempDir::new().unwrap();
    setup_cmd(home.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("agents-md-setup"));
}
