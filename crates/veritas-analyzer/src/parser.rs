//! Tree parsing and the per-path parse cache.
//!
//! Trees are produced by tree-sitter. The TSX grammar would accept plain
//! TypeScript too, but `.ts` files go through the TypeScript grammar so that
//! angle-bracket casts parse; `.js`-family files use the JavaScript grammar.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};
use tracing::debug;
use tree_sitter::{Language, Parser, Tree};
use veritas_common::{AnalysisError, AnalysisResult};

static TYPESCRIPT: Lazy<Language> =
    Lazy::new(|| tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into());
static TSX: Lazy<Language> = Lazy::new(|| tree_sitter_typescript::LANGUAGE_TSX.into());
static JAVASCRIPT: Lazy<Language> = Lazy::new(|| tree_sitter_javascript::LANGUAGE.into());

/// Grammar family used to parse a file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    TypeScript,
    Tsx,
    JavaScript,
}

impl Dialect {
    /// Pick a dialect from a file path. Unknown extensions fall back to the
    /// TypeScript grammar, which is a superset of what we extract from.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("tsx") | Some("jsx") => Self::Tsx,
            Some("js") | Some("mjs") | Some("cjs") => Self::JavaScript,
            _ => Self::TypeScript,
        }
    }

    fn language(self) -> &'static Language {
        match self {
            Self::TypeScript => &TYPESCRIPT,
            Self::Tsx => &TSX,
            Self::JavaScript => &JAVASCRIPT,
        }
    }
}

/// A parsed file: the tree plus the source text it indexes into.
///
/// tree-sitter nodes are byte ranges over the original text, so the text is
/// retained alongside the tree for the lifetime of the cache entry.
#[derive(Debug)]
pub struct ParsedFile {
    pub tree: Tree,
    pub source: String,
    pub dialect: Dialect,
}

impl ParsedFile {
    /// Slice the source text covered by a node.
    pub fn text(&self, node: tree_sitter::Node) -> &str {
        &self.source[node.byte_range()]
    }
}

/// Parse `source` as `dialect`, raising `AnalysisError::Parse` when no usable
/// tree can be produced.
pub fn parse_source(source: &str, path: &Path, dialect: Dialect) -> AnalysisResult<ParsedFile> {
    let mut parser = Parser::new();
    parser
        .set_language(dialect.language())
        .map_err(|e| AnalysisError::Grammar(e.to_string()))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| AnalysisError::parse(path, "parser produced no tree"))?;

    // tree-sitter is error-tolerant; only a wholly unparseable file (ERROR at
    // the root) counts as a parse failure. Local errors still yield usable
    // declarations around them.
    if tree.root_node().is_error() {
        return Err(AnalysisError::parse(path, "source is not valid syntax"));
    }

    Ok(ParsedFile {
        tree,
        source: source.to_string(),
        dialect,
    })
}

/// Cache of parsed trees keyed by file path.
///
/// The key is the *path*, not a content hash: after an on-disk edit the stale
/// tree is returned until [`ParserCache::clear`] is called. That staleness is
/// the documented tradeoff for making repeated queries cheap.
#[derive(Debug, Default)]
pub struct ParserCache {
    trees: FxHashMap<PathBuf, ParsedFile>,
}

impl ParserCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `source` for `path`, or return the cached tree for `path` if one
    /// exists (even when `source` differs from what was cached).
    pub fn parse(&mut self, source: &str, path: &Path) -> AnalysisResult<&ParsedFile> {
        if !self.trees.contains_key(path) {
            let parsed = parse_source(source, path, Dialect::from_path(path))?;
            self.trees.insert(path.to_path_buf(), parsed);
        } else {
            debug!(path = %path.display(), "parse cache hit");
        }
        Ok(&self.trees[path])
    }

    /// Read `path` from disk and parse it, unless a cached tree exists.
    pub fn parse_from_path(&mut self, path: &Path) -> AnalysisResult<&ParsedFile> {
        if !self.trees.contains_key(path) {
            let source =
                std::fs::read_to_string(path).map_err(|e| AnalysisError::io(path, e))?;
            let parsed = parse_source(&source, path, Dialect::from_path(path))?;
            self.trees.insert(path.to_path_buf(), parsed);
        } else {
            debug!(path = %path.display(), "parse cache hit");
        }
        Ok(&self.trees[path])
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// Drop every cached tree. The only way stale entries are evicted.
    pub fn clear(&mut self) {
        debug!(evicted = self.trees.len(), "parse cache cleared");
        self.trees.clear();
    }
}
