//! Workspace file enumeration.
//!
//! The engine itself never walks directories; it is handed explicit file
//! lists. This module is that collaborator: walk a root, honor the ignore
//! set for dependency/build/VCS directories, and keep only source files.

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// Directories never descended into.
const IGNORED_DIRS: &[&str] = &["node_modules", ".git", "dist", "build", "coverage", "out"];

/// Extensions that participate in analysis.
const SOURCE_GLOBS: &[&str] = &[
    "*.ts", "*.tsx", "*.js", "*.jsx", "*.mjs", "*.cjs",
];

fn source_matcher() -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in SOURCE_GLOBS {
        builder.add(Glob::new(pattern).with_context(|| format!("bad glob {pattern}"))?);
    }
    Ok(builder.build()?)
}

fn is_ignored(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| IGNORED_DIRS.contains(&name))
}

/// Enumerate the analyzable source files under `root`, sorted for stable
/// output.
pub fn source_files(root: &Path) -> Result<Vec<PathBuf>> {
    let matcher = source_matcher()?;
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| !is_ignored(e))
    {
        let entry = entry.with_context(|| format!("walking {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if matcher.is_match(entry.file_name()) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    debug!(root = %root.display(), count = files.len(), "enumerated source files");
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn skips_ignored_directories_and_non_source_files() {
        let tmp = TempDir::new().expect("tempdir");
        fs::create_dir_all(tmp.path().join("src")).expect("mkdir");
        fs::create_dir_all(tmp.path().join("node_modules/pkg")).expect("mkdir");
        fs::write(tmp.path().join("src/a.ts"), "").expect("write");
        fs::write(tmp.path().join("src/b.css"), "").expect("write");
        fs::write(tmp.path().join("node_modules/pkg/index.js"), "").expect("write");

        let files = source_files(tmp.path()).expect("enumerate");
        assert_eq!(files, vec![tmp.path().join("src/a.ts")]);
    }

    #[test]
    fn output_is_sorted() {
        let tmp = TempDir::new().expect("tempdir");
        for name in ["z.ts", "a.ts", "m.tsx"] {
            fs::write(tmp.path().join(name), "").expect("write");
        }
        let files = source_files(tmp.path()).expect("enumerate");
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().and_then(|n| n.to_str()).unwrap_or_default())
            .collect();
        assert_eq!(names, vec!["a.ts", "m.tsx", "z.ts"]);
    }
}
