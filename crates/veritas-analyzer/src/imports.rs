//! Import and export extraction.
//!
//! Three import shapes are recognized: static `import` declarations, dynamic
//! `import("...")` calls, and legacy `require("...")` calls. Dynamic and
//! require forms are only tracked when the argument is a literal string;
//! specifiers computed at runtime are invisible to the engine by design.

use std::path::Path;
use tree_sitter::Node;
use veritas_common::{ExportKind, ExportRecord, ImportRecord};

use crate::parser::ParsedFile;
use crate::signatures::render_callable;

/// Extract every import in the file, in source order.
pub fn extract_imports(parsed: &ParsedFile, _file_path: &Path) -> Vec<ImportRecord> {
    let mut out = Vec::new();
    collect_imports(parsed, parsed.tree.root_node(), &mut out);
    out
}

fn collect_imports(parsed: &ParsedFile, node: Node, out: &mut Vec<ImportRecord>) {
    match node.kind() {
        "import_statement" => {
            if let Some(record) = static_import(parsed, node) {
                out.push(record);
            }
        }
        "call_expression" => {
            if let Some(record) = call_import(parsed, node) {
                out.push(record);
            }
        }
        _ => {}
    }
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        collect_imports(parsed, child, out);
    }
}

fn static_import(parsed: &ParsedFile, node: Node) -> Option<ImportRecord> {
    let source = node.child_by_field_name("source")?;
    let mut specifiers = Vec::new();

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() != "import_clause" {
            continue;
        }
        let mut inner = child.walk();
        for binding in child.named_children(&mut inner) {
            match binding.kind() {
                // Default import binding.
                "identifier" => specifiers.push(parsed.text(binding).to_string()),
                // The node text is already the `* as X` marker form.
                "namespace_import" => specifiers.push(parsed.text(binding).to_string()),
                "named_imports" => {
                    let mut specs = binding.walk();
                    for spec in binding.named_children(&mut specs) {
                        if spec.kind() != "import_specifier" {
                            continue;
                        }
                        let Some(name) = spec.child_by_field_name("name") else {
                            continue;
                        };
                        let imported = parsed.text(name);
                        match spec.child_by_field_name("alias") {
                            // Alias kept only when the names actually differ.
                            Some(alias) if parsed.text(alias) != imported => {
                                specifiers.push(format!("{imported} as {}", parsed.text(alias)));
                            }
                            _ => specifiers.push(imported.to_string()),
                        }
                    }
                }
                _ => {}
            }
        }
    }

    Some(ImportRecord {
        specifier: string_literal(parsed, source)?,
        specifiers,
        is_type_only: is_type_only(parsed, node),
        line: Some(node.start_position().row + 1),
    })
}

/// Dynamic `import("lit")` and `require("lit")` calls. Anything without a
/// literal string argument yields no record.
fn call_import(parsed: &ParsedFile, node: Node) -> Option<ImportRecord> {
    let callee = node.child_by_field_name("function")?;
    let marker = match callee.kind() {
        "import" => "dynamic",
        "identifier" if parsed.text(callee) == "require" => "require",
        _ => return None,
    };

    let args = node.child_by_field_name("arguments")?;
    let first = args.named_child(0)?;
    if first.kind() != "string" {
        return None;
    }

    Some(ImportRecord {
        specifier: string_literal(parsed, first)?,
        specifiers: vec![marker.to_string()],
        is_type_only: false,
        line: Some(node.start_position().row + 1),
    })
}

/// Extract every export declaration in the file, in source order.
pub fn extract_exports(parsed: &ParsedFile, file_path: &Path) -> Vec<ExportRecord> {
    let mut out = Vec::new();
    collect_exports(parsed, parsed.tree.root_node(), file_path, &mut out);
    out
}

fn collect_exports(parsed: &ParsedFile, node: Node, file_path: &Path, out: &mut Vec<ExportRecord>) {
    if node.kind() == "export_statement" {
        export_records(parsed, node, file_path, out);
    }
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        collect_exports(parsed, child, file_path, out);
    }
}

fn export_records(parsed: &ParsedFile, node: Node, file_path: &Path, out: &mut Vec<ExportRecord>) {
    let line = Some(node.start_position().row + 1);
    let declaring_file = file_path.display().to_string();
    let source = node
        .child_by_field_name("source")
        .and_then(|s| string_literal(parsed, s));
    let is_default = has_keyword(parsed, node, "default");

    // `export * from "m"` (including `export * as ns from "m"`). Quirk kept
    // from the data-model contract: `file_path` holds the source specifier.
    if let Some(specifier) = &source {
        if node.child_by_field_name("declaration").is_none() && !has_export_clause(node) {
            out.push(ExportRecord {
                name: "*".to_string(),
                kind: ExportKind::ReExportAll,
                file_path: specifier.clone(),
                line,
                signature: None,
            });
            return;
        }
    }

    if let Some(decl) = node.child_by_field_name("declaration") {
        declaration_records(parsed, decl, &declaring_file, line, is_default, out);
        return;
    }

    // `export default expr;`
    if let Some(value) = node.child_by_field_name("value") {
        let name = if value.kind() == "identifier" {
            parsed.text(value).to_string()
        } else {
            "default".to_string()
        };
        out.push(ExportRecord {
            name,
            kind: ExportKind::Default,
            file_path: declaring_file,
            line,
            signature: None,
        });
        return;
    }

    // `export { a, b as c }` with or without a `from` clause.
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
            let Some(name_node) = spec.child_by_field_name("name") else {
                continue;
            };
            // The exported (outward-facing) name is the alias when present.
            let name = spec
                .child_by_field_name("alias")
                .unwrap_or(name_node);
            out.push(ExportRecord {
                name: parsed.text(name).to_string(),
                kind: ExportKind::Named,
                file_path: declaring_file.clone(),
                line,
                signature: None,
            });
        }
    }
}

fn declaration_records(
    parsed: &ParsedFile,
    decl: Node,
    declaring_file: &str,
    line: Option<usize>,
    is_default: bool,
    out: &mut Vec<ExportRecord>,
) {
    let kind_of = |decl_kind: ExportKind| if is_default { ExportKind::Default } else { decl_kind };

    match decl.kind() {
        "function_declaration" | "generator_function_declaration" | "function_signature" => {
            let name = decl
                .child_by_field_name("name")
                .map(|n| parsed.text(n).to_string())
                .unwrap_or_else(|| "default".to_string());
            let signature = Some(render_callable(parsed, decl, &name));
            out.push(ExportRecord {
                name,
                kind: kind_of(ExportKind::Function),
                file_path: declaring_file.to_string(),
                line,
                signature,
            });
        }
        "class_declaration" | "abstract_class_declaration" => {
            let name = decl
                .child_by_field_name("name")
                .map(|n| parsed.text(n).to_string())
                .unwrap_or_else(|| "default".to_string());
            out.push(ExportRecord {
                name,
                kind: kind_of(ExportKind::Class),
                file_path: declaring_file.to_string(),
                line,
                signature: None,
            });
        }
        "lexical_declaration" | "variable_declaration" => {
            let mut cursor = decl.walk();
            for declarator in decl.named_children(&mut cursor) {
                if declarator.kind() != "variable_declarator" {
                    continue;
                }
                let Some(name_node) = declarator.child_by_field_name("name") else {
                    continue;
                };
                if name_node.kind() != "identifier" {
                    continue;
                }
                out.push(ExportRecord {
                    name: parsed.text(name_node).to_string(),
                    kind: kind_of(ExportKind::Variable),
                    file_path: declaring_file.to_string(),
                    line,
                    signature: None,
                });
            }
        }
        "interface_declaration" => {
            if let Some(name_node) = decl.child_by_field_name("name") {
                out.push(ExportRecord {
                    name: parsed.text(name_node).to_string(),
                    kind: kind_of(ExportKind::Interface),
                    file_path: declaring_file.to_string(),
                    line,
                    signature: None,
                });
            }
        }
        "type_alias_declaration" => {
            if let Some(name_node) = decl.child_by_field_name("name") {
                out.push(ExportRecord {
                    name: parsed.text(name_node).to_string(),
                    kind: kind_of(ExportKind::Type),
                    file_path: declaring_file.to_string(),
                    line,
                    signature: None,
                });
            }
        }
        _ => {}
    }
}

/// The unquoted content of a `string` node.
fn string_literal(parsed: &ParsedFile, node: Node) -> Option<String> {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() == "string_fragment" {
            return Some(parsed.text(child).to_string());
        }
    }
    // Empty string literal: no fragment child.
    if node.kind() == "string" {
        return Some(String::new());
    }
    None
}

fn is_type_only(parsed: &ParsedFile, node: Node) -> bool {
    has_keyword(parsed, node, "type")
}

fn has_keyword(parsed: &ParsedFile, node: Node, keyword: &str) -> bool {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if !child.is_named() && parsed.text(child) == keyword {
            return true;
        }
    }
    false
}

fn has_export_clause(node: Node) -> bool {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() == "export_clause" {
            return true;
        }
    }
    false
}

#[cfg(test)]
#[path = "tests/imports.rs"]
mod tests;
