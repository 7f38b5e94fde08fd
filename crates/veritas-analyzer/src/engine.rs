//! The engine instance that owns every cache.
//!
//! All derived state (parsed trees, per-file symbols, signatures, imports,
//! exports) lives on this struct rather than in process-wide globals, so
//! independent engines never cross-contaminate and a `clear_caches` call has
//! a well-defined scope. The caches are plain maps with no lock discipline;
//! callers running concurrently must serialize access or use one engine per
//! logical session.

use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};
use veritas_common::{
    AnalysisResult, ExportRecord, FunctionSignature, ImportRecord, ResolutionResult, Symbol,
};

use crate::parser::ParserCache;
use crate::{imports, resolver, signatures, symbols};

#[derive(Debug, Default)]
pub struct AnalysisEngine {
    pub(crate) parser: ParserCache,
    symbols: FxHashMap<PathBuf, Vec<Symbol>>,
    signatures: FxHashMap<PathBuf, Vec<FunctionSignature>>,
    imports: FxHashMap<PathBuf, Vec<ImportRecord>>,
    exports: FxHashMap<PathBuf, Vec<ExportRecord>>,
}

impl AnalysisEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declared symbols of `path`, with export flags resolved. Cached until
    /// [`AnalysisEngine::clear_caches`]. Parse failures propagate.
    pub fn extract_symbols(&mut self, path: &Path) -> AnalysisResult<&[Symbol]> {
        if !self.symbols.contains_key(path) {
            let parsed = self.parser.parse_from_path(path)?;
            let extracted = symbols::extract_symbols(parsed, path);
            self.symbols.insert(path.to_path_buf(), extracted);
        }
        Ok(&self.symbols[path])
    }

    /// Structural call signatures of every function and class method in
    /// `path`. Independent of the symbol extractor's rendered strings.
    pub fn extract_signatures(&mut self, path: &Path) -> AnalysisResult<&[FunctionSignature]> {
        if !self.signatures.contains_key(path) {
            let parsed = self.parser.parse_from_path(path)?;
            let extracted = signatures::extract_signatures(parsed, path);
            self.signatures.insert(path.to_path_buf(), extracted);
        }
        Ok(&self.signatures[path])
    }

    /// Imports of `path` in source order. Cached until clear.
    pub fn extract_imports(&mut self, path: &Path) -> AnalysisResult<&[ImportRecord]> {
        if !self.imports.contains_key(path) {
            let parsed = self.parser.parse_from_path(path)?;
            let extracted = imports::extract_imports(parsed, path);
            self.imports.insert(path.to_path_buf(), extracted);
        }
        Ok(&self.imports[path])
    }

    /// Exports of `path` in source order. Cached until clear.
    pub fn extract_exports(&mut self, path: &Path) -> AnalysisResult<&[ExportRecord]> {
        if !self.exports.contains_key(path) {
            let parsed = self.parser.parse_from_path(path)?;
            let extracted = imports::extract_exports(parsed, path);
            self.exports.insert(path.to_path_buf(), extracted);
        }
        Ok(&self.exports[path])
    }

    /// Resolve an import specifier from a file. Never cached: resolution is
    /// typically asked once per (specifier, file) pair and depends on
    /// filesystem state.
    pub fn resolve(&self, specifier: &str, from_file: &Path) -> ResolutionResult {
        resolver::resolve(specifier, from_file)
    }

    /// Drop all derived state. The only eviction mechanism: cache keys are
    /// paths, so on-disk edits are masked until this is called.
    pub fn clear_caches(&mut self) {
        self.parser.clear();
        self.symbols.clear();
        self.signatures.clear();
        self.imports.clear();
        self.exports.clear();
    }
}

#[cfg(test)]
#[path = "tests/engine.rs"]
mod tests;
