//! Call validation: arity checks against extracted signatures, and a fixed
//! knowledge base of well-known runtime APIs.
//!
//! Both checks report findings as values. A mismatch is a structured
//! `ValidationResult`/`ApiCheck`, never an error: only "the analysis could
//! not run" (a parse failure during signature extraction) raises.

use std::path::Path;
use veritas_common::{AnalysisResult, ApiCheck, ApiCheckStatus, ValidationResult};

use crate::engine::AnalysisEngine;

impl AnalysisEngine {
    /// Check a call to `name` with `args` against the signature extracted
    /// from `file_path`.
    ///
    /// Without a file path no lookup is possible: the verdict is invalid
    /// with confidence 0 rather than an error. Definite verdicts (signature
    /// found and compared) carry confidence 1.
    pub fn validate_call(
        &mut self,
        name: &str,
        args: &[String],
        file_path: Option<&Path>,
    ) -> AnalysisResult<ValidationResult> {
        let actual_signature = format!("{}({})", name, args.join(", "));

        let Some(path) = file_path else {
            return Ok(ValidationResult {
                valid: false,
                expected_signature: None,
                actual_signature,
                error: Some("no file path provided".to_string()),
                confidence: 0.0,
            });
        };

        let signatures = self.extract_signatures(path)?;
        let Some(signature) = signatures.iter().find(|s| s.name == name) else {
            return Ok(ValidationResult {
                valid: false,
                expected_signature: None,
                actual_signature,
                error: Some(format!(
                    "no function named '{}' found in {}",
                    name,
                    path.display()
                )),
                confidence: 0.0,
            });
        };

        let min_args = signature.min_args();
        let max_args = signature.max_args();
        let expected = signature.render();

        let error = if args.len() < min_args {
            Some(format!(
                "too few arguments: expected at least {min_args}, got {}",
                args.len()
            ))
        } else if args.len() > max_args {
            Some(format!(
                "too many arguments: expected at most {max_args}, got {}",
                args.len()
            ))
        } else {
            None
        };

        Ok(ValidationResult {
            valid: error.is_none(),
            expected_signature: Some(expected),
            actual_signature,
            error,
            confidence: 1.0,
        })
    }
}

struct ApiParam {
    name: &'static str,
    required: bool,
}

const fn req(name: &'static str) -> ApiParam {
    ApiParam {
        name,
        required: true,
    }
}

const fn opt(name: &'static str) -> ApiParam {
    ApiParam {
        name,
        required: false,
    }
}

/// Hand-curated parameter definitions for well-known runtime APIs:
/// filesystem read/write, path utilities, JSON, fetch. Everything outside
/// this table is unverifiable by design, not wrong.
const API_DEFS: &[(&str, &str, &[ApiParam])] = &[
    ("fs", "readFile", &[req("path"), opt("options"), opt("callback")]),
    ("fs", "readFileSync", &[req("path"), opt("options")]),
    ("fs", "writeFile", &[req("file"), req("data"), opt("options"), opt("callback")]),
    ("fs", "writeFileSync", &[req("file"), req("data"), opt("options")]),
    ("fs", "existsSync", &[req("path")]),
    ("fs", "mkdir", &[req("path"), opt("options"), opt("callback")]),
    ("fs", "readdir", &[req("path"), opt("options"), opt("callback")]),
    ("path", "join", &[req("paths")]),
    ("path", "resolve", &[req("paths")]),
    ("path", "dirname", &[req("path")]),
    ("path", "basename", &[req("path"), opt("suffix")]),
    ("path", "extname", &[req("path")]),
    ("path", "relative", &[req("from"), req("to")]),
    ("JSON", "parse", &[req("text"), opt("reviver")]),
    ("JSON", "stringify", &[req("value"), opt("replacer"), opt("space")]),
    ("fetch", "fetch", &[req("url"), opt("options")]),
];

/// Check a known-API call by parameter name.
///
/// Missing required parameters fail; unrecognized parameters only warn. An
/// unknown library, or an unknown API within a known library, is
/// unverifiable and reported as a warning, never as a failure.
pub fn check_known_api(library: &str, method: &str, provided: &[String]) -> ApiCheck {
    if !API_DEFS.iter().any(|&(lib, ..)| lib == library) {
        return ApiCheck {
            status: ApiCheckStatus::Unverifiable,
            missing: Vec::new(),
            warnings: vec![format!("'{library}' is not in the known-API set")],
        };
    }
    let Some(&(.., params)) = API_DEFS
        .iter()
        .find(|&&(lib, name, _)| lib == library && name == method)
    else {
        return ApiCheck {
            status: ApiCheckStatus::Unverifiable,
            missing: Vec::new(),
            warnings: vec![format!("'{library}.{method}' is not in the known-API set")],
        };
    };

    let missing: Vec<String> = params
        .iter()
        .filter(|p| p.required && !provided.iter().any(|given| given == p.name))
        .map(|p| p.name.to_string())
        .collect();

    let warnings: Vec<String> = provided
        .iter()
        .filter(|given| !params.iter().any(|p| p.name == given.as_str()))
        .map(|given| format!("'{given}' is not a recognized parameter of {library}.{method}"))
        .collect();

    let status = if missing.is_empty() {
        ApiCheckStatus::Valid
    } else {
        ApiCheckStatus::MissingRequired
    };

    ApiCheck {
        status,
        missing,
        warnings,
    }
}

#[cfg(test)]
#[path = "tests/validate.rs"]
mod tests;
