// tests/integration_scan.rs
use std::path::Path;

use msgscan_core::baseline::{scan_file, scan_source};
use msgscan_core::error::Error;
use msgscan_core::extract::{Extractor, FailureMode, ScanOptions};
use msgscan_core::syntax::NodeKind;

fn fixture(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn patterns(name: &str) -> Vec<String> {
    let out = scan_file(&fixture(name), &Extractor::default(), ScanOptions::default()).unwrap();
    out.patterns.into_iter().map(|p| p.into_string()).collect()
}

#[test]
fn test_fixture_patterns_in_first_seen_order() {
    let found = patterns("messages.cpp");
    assert_eq!(
        found,
        vec![
            "Validates the incoming request before dispatch.",
            "Invalid count %s for %s",
            "could not open file %s for reading",
            "standalone literal in unknown call",
            "read %s bytes from disk",
            "first half of message and the second half",
        ]
    );
}

#[test]
fn test_header_comment_is_not_a_pattern() {
    let found = patterns("messages.cpp");
    assert!(!found.iter().any(|p| p.contains("Copyright")));
}

#[test]
fn test_diagnostic_output_yields_nothing() {
    let found = patterns("messages.cpp");
    assert!(!found.iter().any(|p| p.contains("debug output")));
    assert!(!found.iter().any(|p| p.contains("diagnostic output")));
}

#[test]
fn test_builder_arguments_are_not_standalone() {
    let found = patterns("messages.cpp");
    assert!(!found.contains(&"could not open file".to_string()));
    assert!(!found.contains(&"Invalid count".to_string()));
}

#[test]
fn test_scanning_twice_is_idempotent() {
    assert_eq!(patterns("messages.cpp"), patterns("messages.cpp"));
}

#[test]
fn test_unsupported_operand_skipped_by_default() {
    let out = scan_file(
        &fixture("unsupported.cpp"),
        &Extractor::default(),
        ScanOptions::default(),
    )
    .unwrap();
    assert!(out.patterns.is_empty());
    assert_eq!(out.failures.len(), 1);
    assert_eq!(out.failures[0].kind, NodeKind::Other("co_await_expression"));
    assert_eq!(out.failures[0].span.line, 3);
}

#[test]
fn test_unsupported_operand_fails_in_strict_mode() {
    let strict = ScanOptions {
        mode: FailureMode::Strict,
        ..ScanOptions::default()
    };
    let err = scan_file(&fixture("unsupported.cpp"), &Extractor::default(), strict).unwrap_err();
    match err {
        Error::Extraction { path, failure } => {
            assert!(path.ends_with("unsupported.cpp"));
            assert_eq!(failure.span.line, 3);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_escapes_and_raw_strings_decode() {
    let src = r#"
void f() {
    errmsg("name may not contain '\0', given", s);
    errhint(R"(use the --force flag)");
}
"#;
    let out = scan_source(src, Path::new("inline.cpp"), &Extractor::default(), ScanOptions::default())
        .unwrap();
    let found: Vec<_> = out.patterns.iter().map(|p| p.as_str()).collect();
    assert_eq!(
        found,
        vec!["name may not contain '\\0', given %s", "use the --force flag"]
    );
}

#[test]
fn test_nested_builder_becomes_placeholder() {
    let src = r#"
void f() {
    errmsg("outer failure while", str::stream() << "inner step " << n << " broke");
}
"#;
    let out = scan_source(src, Path::new("inline.cpp"), &Extractor::default(), ScanOptions::default())
        .unwrap();
    let found: Vec<_> = out.patterns.iter().map(|p| p.as_str()).collect();
    assert_eq!(found, vec!["inner step %s broke", "outer failure while %s"]);
}

fn assert_has(found: &[String], expected: &[&str]) {
    for pattern in expected {
        assert!(found.iter().any(|p| p == pattern), "missing {pattern:?} in {found:#?}");
    }
}

#[test]
fn test_string_builder_variable_accumulates_across_statements() {
    let found = patterns("testStringBuilder.c");
    assert_has(
        &found,
        &[
            "View cycle detected: %s => %s",
            "View depth limit exceeded; maximum depth is %s",
            "View %s has a collation that does not match the collation of view %s",
        ],
    );
    assert!(!found.contains(&"View cycle detected:".to_string()));
}

#[test]
fn test_insertion_operator_samples() {
    let found = patterns("testInsertionOperator.c");
    assert_has(
        &found,
        &[
            "Function %s takes [%s] arguments. However, function was called with %s arguments.",
            "Format: python3 SomeSamplePythonFile.py %s => %s",
            "Invalid use of Function1 [%s]. Function was called with arguments: %s",
            "Verify StringBuilder usage",
        ],
    );
}

#[test]
fn test_multi_line_errmsg_arguments_join() {
    let date = "PlanExecutor error during aggregation :: caused by :: Invalid range: \
                Expected the sortBy field to be a Date, but it was %s %s";
    let number = "PlanExecutor error during aggregation :: caused by :: Invalid range: \
                  Expected the sortBy field to be a number, but it was %s %s";

    let found = patterns("testMultiLineErrMsg.c");
    assert_has(&found, &[date, number]);
    assert!(!found.iter().any(|p| p.starts_with("Visits a top level field")));

    let found = patterns("testDocumentDBStringLiterals.c");
    assert_eq!(found.iter().filter(|p| p.starts_with("PlanExecutor")).count(), 1);
    assert_has(&found, &[date, "Verify multi-line errmsg"]);
}

#[test]
fn test_std_stream_builder_and_suppressed_output() {
    let found = patterns("testStdMultiLineErrMsg.c");
    assert_has(
        &found,
        &["The dollar ($) prefixed field '%s' in '%s' is not allowed in the context of an \
           update's replacement document. Consider using an aggregation pipeline with $replaceWith."],
    );
    assert!(!found.iter().any(|p| p.contains("DBRef")));
    assert!(!found.iter().any(|p| p.contains("Invalid field detected")));
    assert!(!found.iter().any(|p| p.contains("current schema version")));
}

#[test]
fn test_bson_field_names_are_too_short() {
    assert!(patterns("testBSONConstructor.c").is_empty());
}

#[test]
fn test_str_stream_inside_assertions() {
    assert_has(
        &patterns("testMultiLineStrStreamInUAssert.c"),
        &[
            "%s: starting index must be a numeric type (is BSON type %s)",
            "%s: length must be a numeric type (is BSON type %s)",
            "%s: starting index must be non-negative (got: %s)",
            "invalid parameter: expected an object (%s)",
        ],
    );
    assert_has(
        &patterns("testStringFromClass.c"),
        &["Expression %s takes exactly %s arguments. %s were passed in."],
    );
}
