use super::*;
use std::fs;
use tempfile::TempDir;

fn write_file(dir: &Path, rel: &str, content: &str) -> PathBuf {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("mkdir");
    }
    fs::write(&path, content).expect("write");
    path
}

#[test]
fn graph_links_resolved_relative_imports() {
    let tmp = TempDir::new().expect("tempdir");
    let b = write_file(tmp.path(), "b.ts", "export const value = 1;\n");
    let a = write_file(tmp.path(), "a.ts", "import { value } from './b';\n");

    let mut engine = AnalysisEngine::new();
    let graph = engine.build_graph(&[a.clone(), b.clone()]);

    assert!(graph[&a].contains(&b));
    assert!(graph[&b].is_empty());
}

#[test]
fn external_specifiers_are_excluded() {
    let tmp = TempDir::new().expect("tempdir");
    let a = write_file(
        tmp.path(),
        "a.ts",
        "import fs from 'fs';\nimport react from 'react';\n",
    );

    let mut engine = AnalysisEngine::new();
    let graph = engine.build_graph(&[a.clone()]);
    assert!(graph[&a].is_empty());
}

#[test]
fn unresolvable_imports_are_excluded() {
    let tmp = TempDir::new().expect("tempdir");
    let a = write_file(tmp.path(), "a.ts", "import { x } from './missing';\n");

    let mut engine = AnalysisEngine::new();
    let graph = engine.build_graph(&[a.clone()]);
    assert!(graph[&a].is_empty());
}

#[test]
fn unreadable_files_are_skipped_not_fatal() {
    let tmp = TempDir::new().expect("tempdir");
    let a = write_file(tmp.path(), "a.ts", "export {};\n");
    let ghost = tmp.path().join("ghost.ts");

    let mut engine = AnalysisEngine::new();
    let graph = engine.build_graph(&[a.clone(), ghost.clone()]);
    assert!(graph.contains_key(&a));
    assert!(!graph.contains_key(&ghost));
}

#[test]
fn graph_spans_index_file_resolution() {
    let tmp = TempDir::new().expect("tempdir");
    let index = write_file(tmp.path(), "lib/index.ts", "export const lib = true;\n");
    let a = write_file(tmp.path(), "a.ts", "import { lib } from './lib';\n");

    let mut engine = AnalysisEngine::new();
    let graph = engine.build_graph(&[a.clone(), index.clone()]);
    assert!(graph[&a].contains(&index));
}

#[test]
fn find_importers_returns_files_resolving_to_target() {
    let tmp = TempDir::new().expect("tempdir");
    let b = write_file(tmp.path(), "b.ts", "export const value = 1;\n");
    let a = write_file(tmp.path(), "a.ts", "import { value } from './b';\n");
    let c = write_file(tmp.path(), "c.ts", "import fs from 'fs';\n");

    let mut engine = AnalysisEngine::new();
    let all = vec![a.clone(), b.clone(), c.clone()];
    let importers = engine.find_importers(&b, &all);
    assert_eq!(importers, vec![a]);
}

#[test]
fn find_importers_counts_a_file_once() {
    let tmp = TempDir::new().expect("tempdir");
    let b = write_file(tmp.path(), "b.ts", "export const v = 1;\nexport const w = 2;\n");
    let a = write_file(
        tmp.path(),
        "a.ts",
        "import { v } from './b';\nimport { w } from './b.ts';\n",
    );

    let mut engine = AnalysisEngine::new();
    let importers = engine.find_importers(&b, &[a.clone(), b.clone()]);
    assert_eq!(importers.len(), 1);
}

#[test]
fn find_exporting_file_honors_search_order() {
    let tmp = TempDir::new().expect("tempdir");
    let first = write_file(tmp.path(), "first.ts", "export function shared() {}\n");
    let second = write_file(tmp.path(), "second.ts", "export function shared() {}\n");

    let mut engine = AnalysisEngine::new();
    let found = engine.find_exporting_file("shared", &[first.clone(), second.clone()]);
    assert_eq!(found, Some(first));

    let found = engine.find_exporting_file("nonexistent", &[second]);
    assert_eq!(found, None);
}
