// tests/integration_cli.rs - Exit code and output tests for the binary
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_msgscan"))
        .current_dir(dir)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to execute msgscan")
}

fn fixture(name: &str) -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
        .display()
        .to_string()
}

#[test]
fn test_exit_0_extract_to_stdout() {
    let d = tempfile::tempdir().unwrap();
    let out = run(d.path(), &["extract", &fixture("messages.cpp")]);
    assert_eq!(out.status.code(), Some(0), "{}", String::from_utf8_lossy(&out.stderr));
    let patterns: Vec<String> = serde_json::from_slice(&out.stdout).unwrap();
    assert!(patterns.contains(&"Invalid count %s for %s".to_string()));
}

#[test]
fn test_exit_0_compare_json_report() {
    let d = tempfile::tempdir().unwrap();
    fs::write(d.path().join("src.json"), r#"["disk full"]"#).unwrap();
    fs::write(
        d.path().join("dst.json"),
        r#"["disk full", "unrelated thing here"]"#,
    )
    .unwrap();
    let out = run(
        d.path(),
        &["compare", "src.json", "dst.json", "--format", "json", "-o", "report.json"],
    );
    assert_eq!(out.status.code(), Some(0), "{}", String::from_utf8_lossy(&out.stderr));

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(d.path().join("report.json")).unwrap()).unwrap();
    assert_eq!(report[0]["source_line"], "disk full");
    assert_eq!(report[0]["target_matches"][0]["match_type"], "exact");
    assert_eq!(report[0]["target_matches"][0]["similarity_score"], 100.0);
}

#[test]
fn test_compare_indices_follow_file_order() {
    let d = tempfile::tempdir().unwrap();
    fs::write(d.path().join("src.json"), r#"["zzz last", "disk full now", "disk full now"]"#).unwrap();
    fs::write(
        d.path().join("dst.json"),
        r#"["zzz unrelated words here", "disk full now"]"#,
    )
    .unwrap();
    let out = run(
        d.path(),
        &["compare", "src.json", "dst.json", "--format", "json"],
    );
    assert_eq!(out.status.code(), Some(0), "{}", String::from_utf8_lossy(&out.stderr));

    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let entries = report.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["source_index"], 1);
    assert_eq!(entries[1]["source_index"], 2);
    assert_eq!(entries[0]["target_matches"][0]["target_index"], 1);
    assert_eq!(entries[0]["target_matches"][0]["target_line"], "disk full now");
}

#[test]
fn test_exit_2_malformed_baseline() {
    let d = tempfile::tempdir().unwrap();
    fs::write(d.path().join("src.json"), r#"{"not": "a list"}"#).unwrap();
    fs::write(d.path().join("dst.json"), "[]").unwrap();
    let out = run(d.path(), &["compare", "src.json", "dst.json"]);
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn test_exit_2_missing_input() {
    let d = tempfile::tempdir().unwrap();
    let out = run(d.path(), &["extract", "does/not/exist"]);
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn test_exit_3_bad_threshold() {
    let d = tempfile::tempdir().unwrap();
    fs::write(d.path().join("a.json"), "[]").unwrap();
    let out = run(d.path(), &["compare", "a.json", "a.json", "--min-score", "150"]);
    assert_eq!(out.status.code(), Some(3));
}

#[test]
fn test_exit_3_bad_config_file() {
    let d = tempfile::tempdir().unwrap();
    fs::write(d.path().join("msgscan.toml"), "[match]\ncap = 0.0\n").unwrap();
    let out = run(d.path(), &["config"]);
    assert_eq!(out.status.code(), Some(3));
}

#[test]
fn test_exit_4_strict_extraction_failure() {
    let d = tempfile::tempdir().unwrap();
    let out = run(d.path(), &["extract", "--strict", &fixture("unsupported.cpp")]);
    assert_eq!(out.status.code(), Some(4));

    let lenient = run(d.path(), &["extract", &fixture("unsupported.cpp")]);
    assert_eq!(lenient.status.code(), Some(0));
}

#[test]
fn test_config_prints_effective_settings() {
    let d = tempfile::tempdir().unwrap();
    let out = run(d.path(), &["config"]);
    assert_eq!(out.status.code(), Some(0));
    let text = String::from_utf8_lossy(&out.stdout);
    assert!(text.contains("min_score = 70.0"), "{text}");
    assert!(text.contains("[extract.calls]"), "{text}");
}
