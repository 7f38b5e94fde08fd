//! Symbol extraction: the declaration walk and the export-promotion pass.
//!
//! Extraction is two-phase by contract. The declaration pass collects every
//! symbol in source order and builds a name index as it goes; the promotion
//! pass then walks export statements and flips `exported` through that index.
//! Promotion never runs concurrently with (or before the end of) the
//! declaration pass over the same file.

use rustc_hash::FxHashMap;
use std::path::Path;
use tree_sitter::Node;
use veritas_common::{Symbol, SymbolKind};

use crate::parser::ParsedFile;
use crate::signatures::render_callable;

/// Index from declared name to the positions of every symbol carrying it.
/// Duplicates (overload entries, redeclarations) all share one key.
type NameIndex = FxHashMap<String, Vec<usize>>;

/// Extract all declared symbols from a parsed file, in source order, with
/// `exported` flags resolved.
pub fn extract_symbols(parsed: &ParsedFile, file_path: &Path) -> Vec<Symbol> {
    let mut symbols = Vec::new();
    let mut index = NameIndex::default();
    collect_declarations(parsed, parsed.tree.root_node(), file_path, &mut symbols, &mut index);
    promote_exports(parsed, parsed.tree.root_node(), &mut symbols, &index);
    symbols
}

fn push_symbol(
    parsed: &ParsedFile,
    node: Node,
    name_node: Node,
    kind: SymbolKind,
    file_path: &Path,
    signature: Option<String>,
    symbols: &mut Vec<Symbol>,
    index: &mut NameIndex,
) {
    let name = parsed.text(name_node).to_string();
    index.entry(name.clone()).or_default().push(symbols.len());
    let pos = node.start_position();
    symbols.push(Symbol {
        name,
        kind,
        file_path: file_path.to_path_buf(),
        line: Some(pos.row + 1),
        column: Some(pos.column),
        signature,
        exported: false,
    });
}

fn collect_declarations(
    parsed: &ParsedFile,
    node: Node,
    file_path: &Path,
    symbols: &mut Vec<Symbol>,
    index: &mut NameIndex,
) {
    match node.kind() {
        // `function_signature` is an overload/ambient declaration; each one
        // is kept as its own entry rather than merged.
        "function_declaration" | "generator_function_declaration" | "function_signature" => {
            if let Some(name_node) = node.child_by_field_name("name") {
                let sig = render_callable(parsed, node, parsed.text(name_node));
                push_symbol(
                    parsed, node, name_node, SymbolKind::Function, file_path, Some(sig), symbols,
                    index,
                );
            }
        }
        "class_declaration" | "abstract_class_declaration" => {
            if let Some(name_node) = node.child_by_field_name("name") {
                push_symbol(
                    parsed, node, name_node, SymbolKind::Class, file_path, None, symbols, index,
                );
            }
            if let Some(body) = node.child_by_field_name("body") {
                collect_methods(parsed, body, file_path, symbols, index);
            }
        }
        "lexical_declaration" | "variable_declaration" => {
            let mut cursor = node.walk();
            for declarator in node.named_children(&mut cursor) {
                if declarator.kind() != "variable_declarator" {
                    continue;
                }
                if let Some(name_node) = declarator.child_by_field_name("name") {
                    // Destructuring patterns are not broken apart; only
                    // plain identifier declarators become symbols.
                    if name_node.kind() == "identifier" {
                        push_symbol(
                            parsed, declarator, name_node, SymbolKind::Variable, file_path, None,
                            symbols, index,
                        );
                    }
                }
            }
        }
        "interface_declaration" => {
            if let Some(name_node) = node.child_by_field_name("name") {
                push_symbol(
                    parsed, node, name_node, SymbolKind::Interface, file_path, None, symbols,
                    index,
                );
            }
        }
        "type_alias_declaration" => {
            if let Some(name_node) = node.child_by_field_name("name") {
                push_symbol(
                    parsed, node, name_node, SymbolKind::Type, file_path, None, symbols, index,
                );
            }
        }
        _ => {}
    }

    // Keep walking: declarations nest (export statements, function bodies,
    // namespaces). Methods are not revisited here; `method_definition` is
    // only handled inside `collect_methods`.
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        collect_declarations(parsed, child, file_path, symbols, index);
    }
}

/// One symbol per named, non-computed method in a class body.
fn collect_methods(
    parsed: &ParsedFile,
    body: Node,
    file_path: &Path,
    symbols: &mut Vec<Symbol>,
    index: &mut NameIndex,
) {
    let mut cursor = body.walk();
    for member in body.named_children(&mut cursor) {
        if member.kind() != "method_definition" {
            continue;
        }
        let Some(name_node) = member.child_by_field_name("name") else {
            continue;
        };
        if name_node.kind() == "computed_property_name" {
            continue;
        }
        let sig = render_callable(parsed, member, parsed.text(name_node));
        push_symbol(
            parsed, member, name_node, SymbolKind::Method, file_path, Some(sig), symbols, index,
        );
    }
}

/// Second pass: flip `exported` on previously collected symbols by name.
fn promote_exports(parsed: &ParsedFile, node: Node, symbols: &mut Vec<Symbol>, index: &NameIndex) {
    if node.kind() == "export_statement" {
        promote_one(parsed, node, symbols, index);
    }
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        promote_exports(parsed, child, symbols, index);
    }
}

fn promote_one(parsed: &ParsedFile, node: Node, symbols: &mut Vec<Symbol>, index: &NameIndex) {
    let flip = |name: &str, symbols: &mut Vec<Symbol>| {
        if let Some(positions) = index.get(name) {
            for &i in positions {
                symbols[i].exported = true;
            }
        }
    };

    if let Some(decl) = node.child_by_field_name("declaration") {
        let names = declared_names(parsed, decl);
        if names.is_empty() && has_default_keyword(parsed, node) {
            // Anonymous default (`export default function () {}`): only a
            // symbol literally named "default" can match.
            flip("default", symbols);
        }
        for name in names {
            flip(&name, symbols);
        }
        return;
    }

    // `export default expr;` — a plain identifier promotes the declaration
    // it names; anything else falls back to the literal "default".
    if let Some(value) = node.child_by_field_name("value") {
        if value.kind() == "identifier" {
            flip(parsed.text(value), symbols);
        } else {
            flip("default", symbols);
        }
        return;
    }

    // `export { a, b as c }` without a source re-exports local declarations;
    // with a source it forwards another module's names and promotes nothing.
    if node.child_by_field_name("source").is_some() {
        return;
    }
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() != "export_clause" {
            continue;
        }
        let mut inner = child.walk();
        for spec in child.named_children(&mut inner) {
            if spec.kind() != "export_specifier" {
                continue;
            }
            if let Some(name_node) = spec.child_by_field_name("name") {
                flip(parsed.text(name_node), symbols);
            }
        }
    }
}

/// Names introduced by a declaration node (multiple for variable statements).
fn declared_names(parsed: &ParsedFile, decl: Node) -> Vec<String> {
    match decl.kind() {
        "function_declaration"
        | "generator_function_declaration"
        | "function_signature"
        | "class_declaration"
        | "abstract_class_declaration"
        | "interface_declaration"
        | "type_alias_declaration"
        | "enum_declaration" => decl
            .child_by_field_name("name")
            .map(|n| vec![parsed.text(n).to_string()])
            .unwrap_or_default(),
        "lexical_declaration" | "variable_declaration" => {
            let mut names = Vec::new();
            let mut cursor = decl.walk();
            for declarator in decl.named_children(&mut cursor) {
                if declarator.kind() != "variable_declarator" {
                    continue;
                }
                if let Some(name_node) = declarator.child_by_field_name("name") {
                    if name_node.kind() == "identifier" {
                        names.push(parsed.text(name_node).to_string());
                    }
                }
            }
            names
        }
        _ => Vec::new(),
    }
}

fn has_default_keyword(parsed: &ParsedFile, node: Node) -> bool {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if !child.is_named() && parsed.text(child) == "default" {
            return true;
        }
    }
    false
}

#[cfg(test)]
#[path = "tests/symbols.rs"]
mod tests;
