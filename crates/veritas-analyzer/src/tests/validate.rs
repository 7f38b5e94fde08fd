use super::*;
use std::fs;
use tempfile::TempDir;
use veritas_common::ApiCheckStatus;

fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn engine_with(source: &str) -> (TempDir, AnalysisEngine, std::path::PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let file = tmp.path().join("a.ts");
    fs::write(&file, source).expect("write");
    (tmp, AnalysisEngine::new(), file)
}

#[test]
fn call_within_arity_window_is_valid() {
    let (_tmp, mut engine, file) = engine_with("function f(a: number, b?: number) {}\n");
    let result = engine
        .validate_call("f", &args(&["x"]), Some(&file))
        .expect("analysis runs");
    assert!(result.valid);
    assert_eq!(result.confidence, 1.0);
    assert_eq!(result.expected_signature.as_deref(), Some("f(a: number, b?: number)"));
    assert_eq!(result.actual_signature, "f(x)");
    assert!(result.error.is_none());
}

#[test]
fn too_many_arguments_is_invalid_with_full_confidence() {
    let (_tmp, mut engine, file) = engine_with("function f(a: number, b?: number) {}\n");
    let result = engine
        .validate_call("f", &args(&["x", "y", "z"]), Some(&file))
        .expect("analysis runs");
    assert!(!result.valid);
    assert_eq!(result.confidence, 1.0);
    assert!(result.error.expect("error").contains("expected at most 2"));
}

#[test]
fn too_few_arguments_is_invalid() {
    let (_tmp, mut engine, file) = engine_with("function g(a: string, b: string) {}\n");
    let result = engine
        .validate_call("g", &args(&[]), Some(&file))
        .expect("analysis runs");
    assert!(!result.valid);
    assert!(result.error.expect("error").contains("expected at least 2"));
}

#[test]
fn missing_file_path_means_no_confidence() {
    let mut engine = AnalysisEngine::new();
    let result = engine
        .validate_call("f", &args(&["x"]), None)
        .expect("analysis runs");
    assert!(!result.valid);
    assert_eq!(result.confidence, 0.0);
    assert_eq!(result.error.as_deref(), Some("no file path provided"));
}

#[test]
fn unknown_function_means_no_confidence() {
    let (_tmp, mut engine, file) = engine_with("function real() {}\n");
    let result = engine
        .validate_call("imaginary", &args(&[]), Some(&file))
        .expect("analysis runs");
    assert!(!result.valid);
    assert_eq!(result.confidence, 0.0);
    assert!(result.error.expect("error").contains("imaginary"));
}

#[test]
fn class_method_calls_validate_too() {
    let (_tmp, mut engine, file) =
        engine_with("class Api {\n  get(url: string, options?: object) {}\n}\n");
    let result = engine
        .validate_call("get", &args(&["u"]), Some(&file))
        .expect("analysis runs");
    assert!(result.valid);
}

#[test]
fn parse_failure_is_an_error_not_a_verdict() {
    let mut engine = AnalysisEngine::new();
    let missing = std::path::Path::new("/no/such/file.ts");
    assert!(engine.validate_call("f", &args(&[]), Some(missing)).is_err());
}

#[test]
fn known_api_with_required_params_is_valid() {
    let check = check_known_api("fs", "readFile", &args(&["path", "options"]));
    assert_eq!(check.status, ApiCheckStatus::Valid);
    assert!(check.missing.is_empty());
    assert!(check.warnings.is_empty());
}

#[test]
fn known_api_missing_required_param() {
    let check = check_known_api("JSON", "parse", &args(&[]));
    assert_eq!(check.status, ApiCheckStatus::MissingRequired);
    assert_eq!(check.missing, vec!["text"]);
}

#[test]
fn unrecognized_param_warns_but_does_not_fail() {
    let check = check_known_api("JSON", "stringify", &args(&["value", "indent"]));
    assert_eq!(check.status, ApiCheckStatus::Valid);
    assert_eq!(check.warnings.len(), 1);
    assert!(check.warnings[0].contains("indent"));
}

#[test]
fn unknown_library_is_unverifiable_never_a_failure() {
    let check = check_known_api("leftpad", "pad", &args(&["str"]));
    assert_eq!(check.status, ApiCheckStatus::Unverifiable);
    assert!(check.missing.is_empty());
    assert_eq!(check.warnings.len(), 1);
}

#[test]
fn unknown_method_in_known_library_is_unverifiable() {
    let check = check_known_api("fs", "teleport", &args(&[]));
    assert_eq!(check.status, ApiCheckStatus::Unverifiable);
    assert!(check.warnings[0].contains("fs.teleport"));
}
