//! Module resolution: mapping an import specifier plus its importing file to
//! a concrete on-disk file.
//!
//! Resolution is a pure function of the specifier, the importing file, and
//! filesystem state at call time. Failures are never errors: they come back
//! as `ResolutionResult { exists: false, .. }` with candidates for "did you
//! mean" reporting.

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};
use tracing::debug;
use veritas_common::ResolutionResult;

/// Source-file extensions probed for extensionless specifiers, in priority
/// order. `.d.ts` comes after the concrete sources it shadows.
const SOURCE_EXTENSIONS: &[&str] = &[
    ".ts", ".tsx", ".d.ts", ".js", ".jsx", ".mjs", ".cjs", ".json",
];

/// Node.js core modules resolvable without touching the filesystem.
const NODE_BUILTINS: &[&str] = &[
    "assert",
    "async_hooks",
    "buffer",
    "child_process",
    "cluster",
    "console",
    "constants",
    "crypto",
    "dgram",
    "dns",
    "domain",
    "events",
    "fs",
    "http",
    "http2",
    "https",
    "inspector",
    "module",
    "net",
    "os",
    "path",
    "perf_hooks",
    "process",
    "punycode",
    "querystring",
    "readline",
    "repl",
    "stream",
    "string_decoder",
    "timers",
    "tls",
    "tty",
    "url",
    "util",
    "v8",
    "vm",
    "worker_threads",
    "zlib",
];

/// Resolve `specifier` as imported from `from_file`.
///
/// Algorithm, first match wins:
/// 1. Node builtins (allow-list or `node:` prefix) resolve to themselves.
/// 2. Bare package specifiers resolve to themselves, never probed on disk:
///    external packages are a trust boundary, not something to verify.
/// 3. Relative/absolute specifiers are probed against the filesystem: the
///    literal path, each source extension appended, `index` files inside the
///    path as a directory, and finally a `package.json` inside it. Manifest
///    presence alone counts as existence; its export map is not consulted
///    (accepted approximation).
/// 4. Otherwise the result reports non-existence plus similarly named
///    candidates from the target directory.
pub fn resolve(specifier: &str, from_file: &Path) -> ResolutionResult {
    if specifier.starts_with("node:") || NODE_BUILTINS.contains(&specifier) {
        return ResolutionResult::found(specifier);
    }

    if !specifier.starts_with('.') && !specifier.starts_with('/') {
        debug!(specifier, "bare specifier trusted without probing");
        return ResolutionResult::found(specifier);
    }

    let base = from_file.parent().unwrap_or_else(|| Path::new("."));
    let candidate = normalize(&base.join(specifier));

    if candidate.is_file() {
        return ResolutionResult::found(candidate);
    }

    for ext in SOURCE_EXTENSIONS {
        let with_ext = append_extension(&candidate, ext);
        if with_ext.is_file() {
            return ResolutionResult::found(with_ext);
        }
    }

    for ext in SOURCE_EXTENSIONS {
        let index = candidate.join(format!("index{ext}"));
        if index.is_file() {
            return ResolutionResult::found(index);
        }
    }

    let manifest = candidate.join("package.json");
    if manifest.is_file() {
        return ResolutionResult::found(manifest);
    }

    let alternatives = similar_files(&candidate);
    debug!(specifier, from = %from_file.display(), "specifier did not resolve");
    ResolutionResult::missing(
        format!(
            "Cannot resolve '{}' imported from {}",
            specifier,
            from_file.display()
        ),
        alternatives,
    )
}

/// Lexically normalize `.` and `..` components without touching the
/// filesystem (the probed paths may not exist).
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// Append a multi-dot extension like `.d.ts` verbatim (Path::set_extension
/// would clobber existing dots in the file name).
fn append_extension(path: &Path, ext: &str) -> PathBuf {
    let mut s: OsString = path.as_os_str().to_os_string();
    s.push(ext);
    PathBuf::from(s)
}

/// Rank files in the target directory by name similarity to the missing
/// specifier, using tsc's spelling-suggestion thresholds.
fn similar_files(candidate: &Path) -> Vec<PathBuf> {
    let Some(dir) = candidate.parent() else {
        return Vec::new();
    };
    let Some(wanted) = candidate.file_name().and_then(|n| n.to_str()) else {
        return Vec::new();
    };
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let wanted_len = wanted.len();
    let max_length_difference = (wanted_len * 34 / 100).max(2);
    let distance_bar = wanted_len * 4 / 10 + 1;

    let mut ranked: Vec<(usize, PathBuf)> = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let stem = strip_source_extension(name);
        if stem == wanted {
            continue;
        }
        if wanted_len.abs_diff(stem.len()) > max_length_difference {
            continue;
        }
        let distance = levenshtein_distance(wanted, stem);
        if distance < distance_bar {
            ranked.push((distance, path));
        }
    }

    ranked.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
    ranked.into_iter().map(|(_, p)| p).take(3).collect()
}

/// Strip a known source extension; `.d.ts` must strip as a whole so `.d` is
/// never left behind as a stem artifact.
fn strip_source_extension(name: &str) -> &str {
    for ext in [".d.ts", ".ts", ".tsx", ".js", ".jsx", ".mjs", ".cjs", ".json"] {
        if let Some(stripped) = name.strip_suffix(ext) {
            return stripped;
        }
    }
    name
}

fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let a_len = a_chars.len();
    let b_len = b_chars.len();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut prev: Vec<usize> = (0..=b_len).collect();
    let mut curr = vec![0usize; b_len + 1];

    for i in 1..=a_len {
        curr[0] = i;
        for j in 1..=b_len {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_len]
}

#[cfg(test)]
#[path = "tests/resolver.rs"]
mod tests;
