//! Common types for the veritas source analysis engine.
//!
//! This crate provides the value types shared across the analyzer and CLI:
//! - Extracted entities (`Symbol`, `ImportRecord`, `ExportRecord`)
//! - Call signatures (`FunctionSignature`, `ParameterInfo`)
//! - Query results (`ResolutionResult`, `ValidationResult`, `ApiCheck`)
//! - The error taxonomy (`AnalysisError`)
//!
//! Everything here is plain data: serde-serializable, no I/O, no caches.

pub mod error;
pub use error::{AnalysisError, AnalysisResult};

pub mod types;
pub use types::{
    ApiCheck, ApiCheckStatus, ExportKind, ExportRecord, FunctionSignature, ImportRecord,
    ParameterInfo, ResolutionResult, Symbol, SymbolKind, ValidationResult,
};
