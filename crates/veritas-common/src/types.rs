//! Value types produced by extraction, resolution, and validation.
//!
//! All per-file outputs are ordered sequences in source order. Nothing is
//! globally deduplicated: duplicate names across files (or overloads within
//! one file) are legitimate and stay distinguishable by `file_path`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The kind of a statically declared entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Function,
    Class,
    Variable,
    Type,
    Interface,
    Method,
}

impl std::fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Function => "function",
            Self::Class => "class",
            Self::Variable => "variable",
            Self::Type => "type",
            Self::Interface => "interface",
            Self::Method => "method",
        };
        f.write_str(s)
    }
}

/// A named, statically declared entity found in one file.
///
/// `exported` starts false at declaration time and is promoted to true by a
/// second pass that matches declaration names against export statements; that
/// pass runs only after the full declaration walk over the same file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub file_path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    pub exported: bool,
}

/// One import statement (or require / dynamic import call) in a file.
///
/// `specifiers` holds binding names in source order, or one of the markers
/// `"dynamic"`, `"require"`, `"* as X"`. Named bindings render as `"a"`, or
/// `"a as b"` when the local name differs from the imported one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRecord {
    pub specifier: String,
    pub specifiers: Vec<String>,
    pub is_type_only: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

/// Kind of export declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportKind {
    Function,
    Class,
    Variable,
    Type,
    Interface,
    /// Bare specifier list: `export { x, y }`.
    Named,
    Default,
    /// `export * from "m"`.
    ReExportAll,
}

/// One export declaration in a file.
///
/// Quirk, kept deliberately: for [`ExportKind::ReExportAll`] the `name` is
/// `"*"` and `file_path` holds the *source module specifier* string rather
/// than the declaring file's path. Consumers that need the declaring file
/// already know it (exports are returned per file).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRecord {
    pub name: String,
    pub kind: ExportKind,
    pub file_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

/// Outcome of resolving one import specifier from one file.
///
/// Never an error: "does not resolve" is an expected finding, reported with
/// `exists = false`, an error message, and nearby candidates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_path: Option<PathBuf>,
    pub exists: bool,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub alternatives: Vec<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResolutionResult {
    /// A successful resolution to a concrete path (or a trusted specifier).
    pub fn found(path: impl Into<PathBuf>) -> Self {
        Self {
            resolved_path: Some(path.into()),
            exists: true,
            alternatives: Vec::new(),
            error: None,
        }
    }

    /// A failed resolution with an explanatory message and candidates.
    pub fn missing(error: impl Into<String>, alternatives: Vec<PathBuf>) -> Self {
        Self {
            resolved_path: None,
            exists: false,
            alternatives,
            error: Some(error.into()),
        }
    }
}

/// One parameter of an extracted function or method signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterInfo {
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_ann: Option<String>,
    pub optional: bool,
}

/// Structural signature of a function or class method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSignature {
    pub name: String,
    pub parameters: Vec<ParameterInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
    pub is_async: bool,
    pub is_generator: bool,
    pub file_path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl FunctionSignature {
    /// Number of parameters without a `?` marker, i.e. the arity floor.
    pub fn min_args(&self) -> usize {
        self.parameters.iter().filter(|p| !p.optional).count()
    }

    /// Total parameter count, i.e. the arity ceiling.
    pub fn max_args(&self) -> usize {
        self.parameters.len()
    }

    /// Render the canonical `name(a: T, b?: U): R` form.
    pub fn render(&self) -> String {
        let params: Vec<String> = self
            .parameters
            .iter()
            .map(|p| {
                let mut s = p.name.clone();
                if p.optional {
                    s.push('?');
                }
                if let Some(ty) = &p.type_ann {
                    s.push_str(": ");
                    s.push_str(ty);
                }
                s
            })
            .collect();
        let mut out = format!("{}({})", self.name, params.join(", "));
        if let Some(ret) = &self.return_type {
            out.push_str(": ");
            out.push_str(ret);
        }
        out
    }
}

/// Verdict of an arity/shape check against an extracted signature.
///
/// `confidence` is 1.0 when a definite determination was possible (the
/// signature was found and compared) and 0.0 when lookup context was
/// insufficient (no file path, or no such function in the file).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_signature: Option<String>,
    pub actual_signature: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub confidence: f32,
}

/// Status of a known-API usage check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ApiCheckStatus {
    Valid,
    MissingRequired,
    /// Unknown library, or unknown API within a known library. Reported as a
    /// warning, never a hard failure.
    Unverifiable,
}

/// Result of checking a call against the fixed knowledge base of well-known
/// runtime APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiCheck {
    pub status: ApiCheckStatus,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub missing: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub warnings: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_arity_bounds() {
        let sig = FunctionSignature {
            name: "f".into(),
            parameters: vec![
                ParameterInfo {
                    name: "a".into(),
                    type_ann: Some("string".into()),
                    optional: false,
                },
                ParameterInfo {
                    name: "b".into(),
                    type_ann: None,
                    optional: true,
                },
            ],
            return_type: Some("void".into()),
            is_async: false,
            is_generator: false,
            file_path: PathBuf::from("/tmp/a.ts"),
            line: Some(1),
        };
        assert_eq!(sig.min_args(), 1);
        assert_eq!(sig.max_args(), 2);
        assert_eq!(sig.render(), "f(a: string, b?): void");
    }

    #[test]
    fn symbol_kind_serializes_lowercase() {
        let json = serde_json::to_string(&SymbolKind::Interface).unwrap();
        assert_eq!(json, "\"interface\"");
    }

    #[test]
    fn resolution_result_omits_empty_fields() {
        let found = ResolutionResult::found("/tmp/x.ts");
        let json = serde_json::to_value(&found).unwrap();
        assert_eq!(json["exists"], true);
        assert!(json.get("error").is_none());
        assert!(json.get("alternatives").is_none());

        let missing = ResolutionResult::missing("no such module", vec![]);
        assert!(!missing.exists);
        assert!(missing.error.is_some());
    }
}
