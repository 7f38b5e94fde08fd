//! The veritas binary.
//!
//! Every subcommand prints a JSON document on stdout. Findings ("this import
//! does not resolve", "this call has too many arguments") are structured
//! results with exit code 0; failures of the analysis itself (unreadable or
//! unparseable input) exit non-zero through the error path. The two are
//! never conflated.

mod args;
mod workspace;

use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use veritas_analyzer::AnalysisEngine;

use crate::args::{CliArgs, Command};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = CliArgs::parse();
    let mut engine = AnalysisEngine::new();

    match cli.command {
        Command::Symbols { file } => {
            let symbols = engine.extract_symbols(&file)?;
            print_json(&symbols, cli.pretty)?;
        }
        Command::Signatures { file } => {
            let signatures = engine.extract_signatures(&file)?;
            print_json(&signatures, cli.pretty)?;
        }
        Command::Imports { file } => {
            let imports = engine.extract_imports(&file)?;
            print_json(&imports, cli.pretty)?;
        }
        Command::Exports { file } => {
            let exports = engine.extract_exports(&file)?;
            print_json(&exports, cli.pretty)?;
        }
        Command::Resolve { specifier, from } => {
            let result = engine.resolve(&specifier, &from);
            print_json(&result, cli.pretty)?;
        }
        Command::Graph { root } => {
            let files = workspace::source_files(&root)?;
            let graph = engine.build_graph(&files);
            print_json(&graph, cli.pretty)?;
        }
        Command::Importers { file, root } => {
            let files = workspace::source_files(&root)?;
            let importers = engine.find_importers(&file, &files);
            print_json(&importers, cli.pretty)?;
        }
        Command::Exporter { symbol, root } => {
            let files = workspace::source_files(&root)?;
            let found = engine.find_exporting_file(&symbol, &files);
            print_json(&found, cli.pretty)?;
        }
        Command::ValidateCall { name, file, args } => {
            let result = engine.validate_call(&name, &args, file.as_deref())?;
            print_json(&result, cli.pretty)?;
        }
        Command::CheckApi {
            library,
            method,
            params,
        } => {
            let check = veritas_analyzer::check_known_api(&library, &method, &params);
            print_json(&check, cli.pretty)?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{rendered}");
    Ok(())
}
