//! Error taxonomy for the analysis engine.
//!
//! Only failures of the analysis *machinery* are errors. "Import does not
//! resolve" and "call signature mismatch" are expected outcomes that callers
//! need to inspect, so they are ordinary result values
//! ([`ResolutionResult`](crate::ResolutionResult),
//! [`ValidationResult`](crate::ValidationResult)), never raised through this
//! type.

use std::path::PathBuf;
use thiserror::Error;

/// Convenience alias used throughout the analyzer.
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// A failure of the analysis itself, as opposed to a negative finding.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The parser could not produce a syntax tree for a file.
    ///
    /// Always propagated to the immediate caller. Bulk fan-out operations
    /// (whole-workspace graph builds) may skip the failing file and continue,
    /// but single-file queries must surface this.
    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// A file could not be read from disk.
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The tree-sitter grammar could not be loaded into a parser.
    #[error("grammar error: {0}")]
    Grammar(String),
}

impl AnalysisError {
    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// The file path this error originated from, when one is known.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Parse { path, .. } | Self::Io { path, .. } => Some(path),
            Self::Grammar(_) => None,
        }
    }
}
