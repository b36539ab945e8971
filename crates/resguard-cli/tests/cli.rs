// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Integration tests for `resguard check` and `resguard rules`.
//! Each test runs the binary against JSON unit fixtures and checks the
//! exit status and output.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn resguard(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_resguard"))
        .args(args)
        .env("NO_COLOR", "1")
        .output()
        .expect("failed to run resguard")
}

fn check(args: &[&str]) -> Output {
    let mut all = vec!["check"];
    all.extend_from_slice(args);
    resguard(&all)
}

fn path(name: &str) -> String {
    fixture(name).display().to_string()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

#[test]
fn explicit_close_is_reported_as_info() {
    let out = check(&[&path("closed.json")]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));

    let err = stderr(&out);
    assert!(err.contains("info[resource/try-with-resources]"));
    assert!(err.contains("ResourceResolver can be closed using try-with-resources Java 7 feature."));
    assert!(err.contains("Closed.java:3:5"));
    assert!(err.contains("ResourceResolver rr = factory.getResourceResolver(null);"));
    assert!(err.contains("0 error(s), 0 warning(s), 1 info"));
}

#[test]
fn scoped_resource_is_clean() {
    let out = check(&[&path("scoped.json")]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("No resource issues found"));
}

#[test]
fn json_report() {
    let out = check(&["--format", "json", &path("leak.json")]);
    assert!(out.status.success());

    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(report["file"], "Leak.java");
    assert_eq!(report["success"], true);
    assert_eq!(report["warning_count"], 1);
    let diag = &report["diagnostics"][0];
    assert_eq!(diag["rule"], "resource/unclosed");
    assert_eq!(diag["legacy_key"], "AEM-3");
    assert_eq!(diag["variable"], "leaked");
    assert_eq!(diag["location"]["offset"], 120);
    assert_eq!(diag["location"]["line"], 0);
}

#[test]
fn config_severity_fails_the_run() {
    let out = check(&["--config", &path("strict.toml"), &path("leak.json")]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("error[resource/unclosed]"));
}

#[test]
fn excluded_rules_are_silent() {
    let out = check(&["--exclude", "resource/*", &path("closed.json"), &path("leak.json")]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("No resource issues found"));
}

#[test]
fn include_filter_selects_one_rule() {
    let out = check(&["--rule", "resource/unclosed", &path("closed.json"), &path("leak.json")]);
    assert!(out.status.success());
    let err = stderr(&out);
    assert!(err.contains("warning[resource/unclosed]"));
    assert!(!err.contains("try-with-resources]"));
}

#[test]
fn load_failure_continues_and_fails() {
    let out = check(&[&path("broken.json"), &path("closed.json")]);
    assert_eq!(out.status.code(), Some(1));
    let err = stderr(&out);
    assert!(err.contains("is not a valid unit file"));
    assert!(err.contains("info[resource/try-with-resources]"));

    let out = check(&["/nonexistent/unit.json"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("cannot read"));
}

#[test]
fn invalid_config_fails() {
    let mut config = tempfile::NamedTempFile::new().unwrap();
    writeln!(config, "[severity]\n\"resource/bogus\" = \"error\"").unwrap();
    let config_path = config.path().display().to_string();

    let out = check(&["--config", &config_path, &path("closed.json")]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("unknown rule `resource/bogus`"));
}

#[test]
fn custom_release_method_from_config() {
    let mut config = tempfile::NamedTempFile::new().unwrap();
    writeln!(config, "[resource]\nrelease-methods = [\"logout\"]").unwrap();
    let config_path = config.path().display().to_string();

    // `close` no longer releases, so the handle counts as leaked.
    let out = check(&["--config", &config_path, &path("closed.json")]);
    assert!(out.status.success());
    assert!(stderr(&out).contains("warning[resource/unclosed]"));
}

#[test]
fn rules_lists_registry() {
    let out = resguard(&["rules"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("resource/try-with-resources"));
    assert!(text.contains("AEM-5"));
    assert!(text.contains("ResourceResolver can be closed using try-with-resources"));
    assert!(text.contains("resource/unclosed"));
    assert!(text.contains("tags: java7"));
}

#[test]
fn missing_files_is_a_usage_error() {
    let out = resguard(&["check"]);
    assert!(!out.status.success());
}
