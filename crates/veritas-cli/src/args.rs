//! CLI arguments for the veritas binary.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "veritas",
    version,
    about = "Ground-truth analysis of ECMAScript/TypeScript codebases: symbols, imports, exports, resolution, dependency graphs"
)]
pub struct CliArgs {
    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the declared symbols of a file, with export flags.
    Symbols {
        file: PathBuf,
    },

    /// List the structural call signatures of a file.
    Signatures {
        file: PathBuf,
    },

    /// List the imports of a file (static, dynamic, require).
    Imports {
        file: PathBuf,
    },

    /// List the exports of a file.
    Exports {
        file: PathBuf,
    },

    /// Resolve an import specifier as seen from a file.
    Resolve {
        specifier: String,

        /// The importing file the specifier is relative to.
        #[arg(long)]
        from: PathBuf,
    },

    /// Build the file dependency graph of a workspace.
    Graph {
        #[arg(default_value = ".")]
        root: PathBuf,
    },

    /// List the files in a workspace that import the target file.
    Importers {
        file: PathBuf,

        #[arg(default_value = ".")]
        root: PathBuf,
    },

    /// Find the first file in a workspace exporting the named symbol.
    Exporter {
        symbol: String,

        #[arg(default_value = ".")]
        root: PathBuf,
    },

    /// Check a call's argument count against the signature extracted from a file.
    ValidateCall {
        name: String,

        /// File the function is declared in. Without it no lookup is
        /// possible and the verdict has zero confidence.
        #[arg(long)]
        file: Option<PathBuf>,

        /// Comma-separated argument expressions of the call site.
        #[arg(long, value_delimiter = ',')]
        args: Vec<String>,
    },

    /// Check a well-known runtime API usage by parameter name.
    CheckApi {
        library: String,
        method: String,

        /// Comma-separated parameter names provided at the call site.
        #[arg(long, value_delimiter = ',')]
        params: Vec<String>,
    },
}
