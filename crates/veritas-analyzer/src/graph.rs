//! File-level dependency graph derived from resolved imports.
//!
//! Built fresh per invocation from current extraction state; there is no
//! incremental-update contract. External (bare) specifiers never appear in
//! the graph: only relative imports that resolve to an existing file.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::engine::AnalysisEngine;

/// file -> set of files it depends on. BTree keeps serialized output stable.
pub type DependencyGraph = BTreeMap<PathBuf, BTreeSet<PathBuf>>;

/// Relative specifiers participate in the graph; bare package specifiers and
/// builtins are outside the trust boundary.
fn is_relative(specifier: &str) -> bool {
    specifier.starts_with('.') || specifier.starts_with('/')
}

impl AnalysisEngine {
    /// Build the dependency graph over `file_paths`.
    ///
    /// This is a bulk fan-out: files that fail to parse are skipped (with a
    /// warning) so one broken file cannot sink a whole-workspace build.
    /// Single-file queries never get that treatment.
    pub fn build_graph(&mut self, file_paths: &[PathBuf]) -> DependencyGraph {
        let mut graph = DependencyGraph::new();
        for path in file_paths {
            let records = match self.extract_imports(path) {
                Ok(records) => records.to_vec(),
                Err(err) => {
                    warn!(path = %path.display(), %err, "skipping file in graph build");
                    continue;
                }
            };

            let mut deps = BTreeSet::new();
            for record in &records {
                if !is_relative(&record.specifier) {
                    continue;
                }
                let resolution = self.resolve(&record.specifier, path);
                if resolution.exists {
                    if let Some(resolved) = resolution.resolved_path {
                        deps.insert(resolved);
                    }
                }
            }
            graph.insert(path.clone(), deps);
        }
        graph
    }

    /// Every file in `all_files` with at least one import resolving to
    /// `target`. Short-circuits per candidate on the first match.
    pub fn find_importers(&mut self, target: &Path, all_files: &[PathBuf]) -> Vec<PathBuf> {
        let mut importers = Vec::new();
        for candidate in all_files {
            if candidate == target {
                continue;
            }
            let records = match self.extract_imports(candidate) {
                Ok(records) => records.to_vec(),
                Err(err) => {
                    warn!(path = %candidate.display(), %err, "skipping file in importer scan");
                    continue;
                }
            };
            for record in &records {
                if !is_relative(&record.specifier) {
                    continue;
                }
                let resolution = self.resolve(&record.specifier, candidate);
                if resolution.resolved_path.as_deref() == Some(target) {
                    importers.push(candidate.clone());
                    break;
                }
            }
        }
        importers
    }

    /// First file (in supplied order) whose export list contains
    /// `symbol_name`, or `None`.
    pub fn find_exporting_file(
        &mut self,
        symbol_name: &str,
        search_paths: &[PathBuf],
    ) -> Option<PathBuf> {
        for path in search_paths {
            let exports = match self.extract_exports(path) {
                Ok(exports) => exports,
                Err(err) => {
                    warn!(path = %path.display(), %err, "skipping file in export search");
                    continue;
                }
            };
            if exports.iter().any(|e| e.name == symbol_name) {
                return Some(path.clone());
            }
        }
        None
    }
}

#[cfg(test)]
#[path = "tests/graph.rs"]
mod tests;
