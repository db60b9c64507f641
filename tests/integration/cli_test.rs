//! End-to-end tests against the playdeck binary
//!
//! Only paths that bail before the terminal is put into raw mode are
//! exercised here; the interactive player itself is covered by the
//! library-level suites.

use assert_cmd::Command;
use predicates::prelude::*;

use super::helpers::fixtures_dir;

fn playdeck() -> Command {
    let mut cmd = Command::cargo_bin("playdeck").expect("binary builds");
    // Keep the user's real configuration out of the tests
    cmd.env("XDG_CONFIG_HOME", env!("CARGO_TARGET_TMPDIR"));
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn version_reports_the_package_version() {
    playdeck()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn no_arguments_shows_usage_and_fails() {
    playdeck()
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn help_lists_the_subcommands() {
    playdeck()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("play")
                .and(predicate::str::contains("lesson"))
                .and(predicate::str::contains("config"))
                .and(predicate::str::contains("completions")),
        );
}

#[test]
fn lesson_validate_accepts_a_complete_reply() {
    playdeck()
        .args(["lesson", "validate"])
        .arg(fixtures_dir().join("lesson_ok.json"))
        .assert()
        .success()
        .stdout(
            predicate::str::contains("valid lesson")
                .and(predicate::str::contains("timeline entries: 3")),
        );
}

#[test]
fn lesson_validate_names_missing_fields() {
    playdeck()
        .args(["lesson", "validate"])
        .arg(fixtures_dir().join("lesson_missing_fields.json"))
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("status 500")
                .and(predicate::str::contains("pseudocode")),
        );
}

#[test]
fn lesson_validate_surfaces_service_rejections() {
    playdeck()
        .args(["lesson", "validate"])
        .arg(fixtures_dir().join("lesson_failure.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("status 429"));
}

#[test]
fn lesson_request_prints_the_wire_document() {
    let output = playdeck()
        .args([
            "lesson",
            "request",
            "Why does quicksort partition in place?",
            "--difficulty",
            "beginner",
            "--length",
            "95",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"question\""))
        .get_output()
        .stdout
        .clone();

    // The printed document must itself be valid JSON
    let value: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON");
    assert_eq!(value["question"], "Why does quicksort partition in place?");
    assert_eq!(value["difficultyLevel"], "beginner");
    assert_eq!(value["desiredLengthSeconds"], 95.0);
}

#[test]
fn lesson_request_rejects_an_empty_question() {
    playdeck()
        .args(["lesson", "request", "  "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("status 400"));
}

#[test]
fn completions_generate_for_bash() {
    playdeck()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("playdeck"));
}

#[test]
fn config_path_points_at_the_user_config_dir() {
    playdeck()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("playdeck").and(predicate::str::contains("config.toml")),
        );
}

#[test]
fn config_show_prints_the_effective_defaults() {
    playdeck()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("[player]")
                .and(predicate::str::contains("initial_volume"))
                .and(predicate::str::contains("hide_delay_ms")),
        );
}

#[test]
fn play_rejects_a_nonpositive_duration() {
    playdeck()
        .args(["play", "clip://x", "--duration", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--duration"));
}

#[test]
fn play_rejects_a_malformed_stall_spec() {
    playdeck()
        .args(["play", "clip://x", "--stall", "nonsense"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("stall"));
}

#[test]
fn play_requires_a_readable_lesson_file() {
    playdeck()
        .args(["play", "clip://x", "--lesson", "/no/such/lesson.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("lesson.json"));
}
