use super::*;
use std::fs;
use tempfile::TempDir;

fn touch(dir: &Path, rel: &str) -> PathBuf {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("mkdir");
    }
    fs::write(&path, "export {};\n").expect("write");
    path
}

#[test]
fn builtins_resolve_to_themselves() {
    let from = Path::new("/t/main.ts");
    let result = resolve("fs", from);
    assert!(result.exists);
    assert_eq!(result.resolved_path.as_deref(), Some(Path::new("fs")));

    let result = resolve("node:path", from);
    assert!(result.exists);
}

#[test]
fn bare_specifiers_are_trusted_without_filesystem_probes() {
    // No filesystem state can make these fail: external packages sit outside
    // the trust boundary.
    let from = Path::new("/definitely/not/a/real/dir/main.ts");
    assert!(resolve("react", from).exists);
    assert!(resolve("@scope/pkg", from).exists);
    assert!(resolve("lodash/merge", from).exists);
}

#[test]
fn relative_specifier_resolves_with_extension_probe() {
    let tmp = TempDir::new().expect("tempdir");
    let utils = touch(tmp.path(), "utils.ts");
    let from = tmp.path().join("main.ts");

    let result = resolve("./utils", &from);
    assert!(result.exists);
    assert_eq!(result.resolved_path.as_deref(), Some(utils.as_path()));
}

#[test]
fn literal_path_wins_over_extension_probe() {
    let tmp = TempDir::new().expect("tempdir");
    let exact = touch(tmp.path(), "data.json");
    let from = tmp.path().join("main.ts");

    let result = resolve("./data.json", &from);
    assert_eq!(result.resolved_path.as_deref(), Some(exact.as_path()));
}

#[test]
fn directory_resolves_through_index_file() {
    let tmp = TempDir::new().expect("tempdir");
    let index = touch(tmp.path(), "lib/index.ts");
    let from = tmp.path().join("main.ts");

    let result = resolve("./lib", &from);
    assert!(result.exists);
    assert_eq!(result.resolved_path.as_deref(), Some(index.as_path()));
}

#[test]
fn package_manifest_presence_counts_as_existence() {
    // Deliberate approximation: the export map inside the manifest is not
    // consulted.
    let tmp = TempDir::new().expect("tempdir");
    let manifest = tmp.path().join("pkg/package.json");
    fs::create_dir_all(tmp.path().join("pkg")).expect("mkdir");
    fs::write(&manifest, "{}").expect("write");
    let from = tmp.path().join("main.ts");

    let result = resolve("./pkg", &from);
    assert!(result.exists);
    assert_eq!(result.resolved_path.as_deref(), Some(manifest.as_path()));
}

#[test]
fn parent_directory_traversal() {
    let tmp = TempDir::new().expect("tempdir");
    let shared = touch(tmp.path(), "shared.ts");
    let from = tmp.path().join("nested/deep/main.ts");
    fs::create_dir_all(tmp.path().join("nested/deep")).expect("mkdir");

    let result = resolve("../../shared", &from);
    assert!(result.exists);
    assert_eq!(result.resolved_path.as_deref(), Some(shared.as_path()));
}

#[test]
fn missing_specifier_reports_error_and_origin() {
    let tmp = TempDir::new().expect("tempdir");
    let from = tmp.path().join("main.ts");

    let result = resolve("./nope", &from);
    assert!(!result.exists);
    assert!(result.resolved_path.is_none());
    let error = result.error.expect("error message");
    assert!(error.contains("./nope"));
    assert!(error.contains("main.ts"));
}

#[test]
fn alternatives_suggest_similarly_named_files() {
    let tmp = TempDir::new().expect("tempdir");
    let helpers = touch(tmp.path(), "helpers.ts");
    touch(tmp.path(), "unrelated_name_entirely.ts");
    let from = tmp.path().join("main.ts");

    let result = resolve("./helper", &from);
    assert!(!result.exists);
    assert!(result.alternatives.contains(&helpers));
    assert!(!result
        .alternatives
        .iter()
        .any(|p| p.ends_with("unrelated_name_entirely.ts")));
}

#[test]
fn resolution_is_pure_per_query() {
    let tmp = TempDir::new().expect("tempdir");
    let from = tmp.path().join("main.ts");

    assert!(!resolve("./late", &from).exists);
    // No cache: the next call observes the new filesystem state.
    let late = touch(tmp.path(), "late.ts");
    let result = resolve("./late", &from);
    assert!(result.exists);
    assert_eq!(result.resolved_path.as_deref(), Some(late.as_path()));
}

#[test]
fn normalize_collapses_dot_segments() {
    assert_eq!(
        normalize(Path::new("/a/b/./c/../d")),
        PathBuf::from("/a/b/d")
    );
    assert_eq!(normalize(Path::new("./x")), PathBuf::from("x"));
}

#[test]
fn levenshtein_distance_basics() {
    assert_eq!(levenshtein_distance("", "abc"), 3);
    assert_eq!(levenshtein_distance("abc", ""), 3);
    assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
    assert_eq!(levenshtein_distance("same", "same"), 0);
}

#[test]
fn strip_source_extension_handles_dts_whole() {
    assert_eq!(strip_source_extension("types.d.ts"), "types");
    assert_eq!(strip_source_extension("mod.ts"), "mod");
    assert_eq!(strip_source_extension("styles.css"), "styles.css");
}
