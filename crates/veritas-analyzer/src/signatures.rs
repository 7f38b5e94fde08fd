//! Call-signature extraction and canonical rendering.
//!
//! `extract_signatures` is an independent traversal over functions and class
//! methods; the signature validator consumes its structured output and never
//! parses the rendered strings.

use std::path::Path;
use tree_sitter::Node;
use veritas_common::{FunctionSignature, ParameterInfo};

use crate::parser::ParsedFile;

/// Extract structural signatures for every named function declaration and
/// class method in the file, in source order.
pub fn extract_signatures(parsed: &ParsedFile, file_path: &Path) -> Vec<FunctionSignature> {
    let mut out = Vec::new();
    collect(parsed, parsed.tree.root_node(), file_path, &mut out);
    out
}

fn collect(parsed: &ParsedFile, node: Node, file_path: &Path, out: &mut Vec<FunctionSignature>) {
    match node.kind() {
        "function_declaration" | "generator_function_declaration" | "function_signature"
        | "method_definition" => {
            if let Some(sig) = signature_of(parsed, node, file_path) {
                out.push(sig);
            }
        }
        _ => {}
    }
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        collect(parsed, child, file_path, out);
    }
}

/// Build a `FunctionSignature` for a callable node, or `None` when the node
/// has no usable (non-computed) name.
pub(crate) fn signature_of(
    parsed: &ParsedFile,
    node: Node,
    file_path: &Path,
) -> Option<FunctionSignature> {
    let name_node = node.child_by_field_name("name")?;
    if name_node.kind() == "computed_property_name" {
        return None;
    }
    Some(FunctionSignature {
        name: parsed.text(name_node).to_string(),
        parameters: parameters_of(parsed, node),
        return_type: return_type_of(parsed, node),
        is_async: is_async(parsed, node),
        is_generator: is_generator(parsed, node),
        file_path: file_path.to_path_buf(),
        line: Some(node.start_position().row + 1),
    })
}

/// Parameters of a callable node, tolerating both the TypeScript grammar's
/// `required_parameter`/`optional_parameter` wrappers and the JavaScript
/// grammar's bare patterns.
pub(crate) fn parameters_of(parsed: &ParsedFile, node: Node) -> Vec<ParameterInfo> {
    let Some(params) = node.child_by_field_name("parameters") else {
        return Vec::new();
    };
    let mut out = Vec::new();
    let mut cursor = params.walk();
    for param in params.named_children(&mut cursor) {
        match param.kind() {
            "required_parameter" | "optional_parameter" => {
                let Some(pattern) = param.child_by_field_name("pattern") else {
                    continue;
                };
                out.push(ParameterInfo {
                    name: parsed.text(pattern).to_string(),
                    type_ann: param
                        .child_by_field_name("type")
                        .map(|t| annotation_type(parsed, t)),
                    optional: param.kind() == "optional_parameter",
                });
            }
            "identifier" => out.push(ParameterInfo {
                name: parsed.text(param).to_string(),
                type_ann: None,
                optional: false,
            }),
            // A default value makes the parameter optional at call sites.
            "assignment_pattern" => {
                if let Some(left) = param.child_by_field_name("left") {
                    out.push(ParameterInfo {
                        name: parsed.text(left).to_string(),
                        type_ann: None,
                        optional: true,
                    });
                }
            }
            "rest_pattern" => out.push(ParameterInfo {
                name: parsed.text(param).to_string(),
                type_ann: None,
                optional: true,
            }),
            _ => {}
        }
    }
    out
}

/// The declared return type, rendered canonically, if annotated.
pub(crate) fn return_type_of(parsed: &ParsedFile, node: Node) -> Option<String> {
    let ann = node.child_by_field_name("return_type")?;
    Some(annotation_type(parsed, ann))
}

/// Render the type inside a `type_annotation` node.
fn annotation_type(parsed: &ParsedFile, annotation: Node) -> String {
    match annotation.named_child(0) {
        Some(ty) => render_type(parsed, ty),
        None => "unknown".to_string(),
    }
}

/// Canonical text for a type node: named and predefined types verbatim,
/// unions joined with ` | `, arrays as `T[]`, anything else `unknown`.
pub(crate) fn render_type(parsed: &ParsedFile, node: Node) -> String {
    match node.kind() {
        "predefined_type" | "type_identifier" => parsed.text(node).to_string(),
        "union_type" => {
            let mut cursor = node.walk();
            let parts: Vec<String> = node
                .named_children(&mut cursor)
                .map(|c| render_type(parsed, c))
                .collect();
            parts.join(" | ")
        }
        "array_type" => match node.named_child(0) {
            Some(elem) => format!("{}[]", render_type(parsed, elem)),
            None => "unknown".to_string(),
        },
        _ => "unknown".to_string(),
    }
}

pub(crate) fn is_async(parsed: &ParsedFile, node: Node) -> bool {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if !child.is_named() && parsed.text(child) == "async" {
            return true;
        }
    }
    false
}

pub(crate) fn is_generator(parsed: &ParsedFile, node: Node) -> bool {
    if node.kind() == "generator_function_declaration" {
        return true;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if !child.is_named() && parsed.text(child) == "*" {
            return true;
        }
    }
    false
}

/// Render the canonical signature string stored on `Symbol`:
/// `[async ][*]name(p[?][: T], ...)[: R]`.
pub(crate) fn render_callable(parsed: &ParsedFile, node: Node, name: &str) -> String {
    let params: Vec<String> = parameters_of(parsed, node)
        .into_iter()
        .map(|p| {
            let mut s = p.name;
            if p.optional {
                s.push('?');
            }
            if let Some(ty) = p.type_ann {
                s.push_str(": ");
                s.push_str(&ty);
            }
            s
        })
        .collect();

    let mut out = String::new();
    if is_async(parsed, node) {
        out.push_str("async ");
    }
    if is_generator(parsed, node) {
        out.push('*');
    }
    out.push_str(name);
    out.push('(');
    out.push_str(&params.join(", "));
    out.push(')');
    if let Some(ret) = return_type_of(parsed, node) {
        out.push_str(": ");
        out.push_str(&ret);
    }
    out
}

#[cfg(test)]
#[path = "tests/signatures.rs"]
mod tests;
