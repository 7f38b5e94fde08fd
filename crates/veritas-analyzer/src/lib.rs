//! Source analysis and resolution engine.
//!
//! Builds a queryable ground-truth model of an ECMAScript/TypeScript file
//! set: which symbols exist, what each file imports and exports, which
//! concrete file an import specifier refers to, and the file-level
//! dependency graph derived from that. Downstream consumers check claims
//! ("this function exists", "this import resolves") against these results
//! instead of trusting free-form assertions.
//!
//! The engine is synchronous and single-threaded. All caches are owned by
//! the [`AnalysisEngine`] instance; independent instances never share state.
//! Concurrent callers must serialize access to one engine or use one engine
//! per logical session.

pub mod engine;
pub use engine::AnalysisEngine;

pub mod parser;
pub use parser::{Dialect, ParsedFile, ParserCache};

pub mod symbols;
pub mod signatures;
pub mod imports;

pub mod resolver;
pub use resolver::resolve;

pub mod graph;
pub use graph::DependencyGraph;

pub mod validate;
pub use validate::check_known_api;
