//! Symbol and reference extraction for the C family (`.c`, `.h`).
//!
//! Grounded on the tree-sitter walking idiom in the teacher's Rust parser
//! (match on `node.kind()`, pull named children with `child_by_field_name`,
//! recurse explicitly) and on the semantics of the original symbol
//! extractor this crate replaces.

use regex::Regex;
use std::sync::LazyLock;
use tree_sitter::{Node, Parser};

use crate::error::{ExtractError, ExtractResult};
use crate::extract::c_lexer;
use crate::model::{Member, Param, Reference, Symbol, SymbolKind};

fn parser() -> ExtractResult<Parser> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_c::LANGUAGE.into())
        .map_err(|_| ExtractError::ParserInit { language: "c" })?;
    Ok(parser)
}

/// Functions whose call site printf-family format string sits at this
/// positional argument index.
fn format_arg_index(name: &str) -> Option<usize> {
    match name {
        "printf" | "scanf" => Some(0),
        "fprintf" | "sprintf" | "fscanf" | "sscanf" => Some(1),
        "snprintf" => Some(2),
        _ => None,
    }
}

static FORMAT_SPECIFIER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"%(?!%)[diouxXeEfFgGaAcspnl*]").unwrap());

pub fn extract(source: &str, file_path: &str) -> ExtractResult<(Vec<Symbol>, Vec<Reference>)> {
    let mut parser = parser()?;
    let tree = parser
        .parse(source, None)
        .ok_or_else(|| ExtractError::NoParseTree { path: file_path.into() })?;

    let mut symbols = Vec::new();
    walk_symbols(tree.root_node(), source, file_path, &mut symbols);

    let mut references = Vec::new();
    walk_references(tree.root_node(), source, &mut references);
    append_subscript_fallback(source, &symbols, &references, &mut references);

    Ok((symbols, references))
}

fn text<'a>(node: Node, source: &'a str) -> &'a str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

fn line_of(node: Node) -> u32 {
    node.start_position().row as u32 + 1
}

/// Concatenates the primitive/sized/identifier/struct type text with one
/// `*` per direct `pointer_declarator` layer. Does not distinguish
/// pointer-to-pointer depth past one `*` in the rendered string — this is
/// a deliberate, documented simplification, not an oversight.
fn type_str(type_node: Option<Node>, declarator: Option<Node>, source: &str) -> String {
    let mut base = String::new();
    if let Some(t) = type_node {
        match t.kind() {
            "primitive_type" | "sized_type_specifier" | "type_identifier" => {
                base.push_str(text(t, source));
            }
            "struct_specifier" => {
                base.push_str("struct ");
                if let Some(name) = t.child_by_field_name("name") {
                    base.push_str(text(name, source));
                }
            }
            _ => base.push_str(text(t, source)),
        }
    }
    let mut node = declarator;
    while let Some(n) = node {
        if n.kind() == "pointer_declarator" {
            base.push('*');
            node = n.child_by_field_name("declarator");
        } else {
            break;
        }
    }
    base
}

fn identifier_from_declarator(node: Node, source: &str) -> Option<String> {
    match node.kind() {
        "identifier" | "field_identifier" => Some(text(node, source).to_string()),
        "pointer_declarator" | "array_declarator" | "function_declarator" | "init_declarator" => {
            node.child_by_field_name("declarator")
                .and_then(|d| identifier_from_declarator(d, source))
        }
        _ => None,
    }
}

fn array_size(declarator: Node, source: &str) -> Option<i64> {
    if declarator.kind() == "array_declarator" {
        if let Some(size) = declarator.child_by_field_name("size") {
            if size.kind() == "number_literal" {
                return text(size, source).parse().ok();
            }
        }
        return declarator
            .child_by_field_name("declarator")
            .and_then(|d| array_size(d, source));
    }
    if declarator.kind() == "pointer_declarator" {
        return declarator
            .child_by_field_name("declarator")
            .and_then(|d| array_size(d, source));
    }
    None
}

fn is_array_declarator(node: Node) -> bool {
    match node.kind() {
        "array_declarator" => true,
        "pointer_declarator" => node
            .child_by_field_name("declarator")
            .is_some_and(is_array_declarator),
        _ => false,
    }
}

fn extract_params(params_node: Node, source: &str) -> (Vec<Param>, bool) {
    let mut params = Vec::new();
    let mut is_variadic = false;
    let mut cursor = params_node.walk();
    for child in params_node.children(&mut cursor) {
        match child.kind() {
            "parameter_declaration" => {
                let ty = child.child_by_field_name("type");
                let decl = child.child_by_field_name("declarator");
                let name = decl.and_then(|d| identifier_from_declarator(d, source));
                if let Some(name) = name {
                    params.push(Param {
                        name,
                        type_: Some(type_str(ty, decl, source)),
                        has_default: false,
                    });
                }
            }
            "variadic_parameter" => is_variadic = true,
            _ => {}
        }
    }
    (params, is_variadic)
}

fn walk_symbols(node: Node, source: &str, file_path: &str, out: &mut Vec<Symbol>) {
    match node.kind() {
        "function_definition" => {
            if let Some(declarator) = node.child_by_field_name("declarator") {
                if declarator.kind() == "function_declarator" {
                    if let Some(inner) = declarator.child_by_field_name("declarator") {
                        if let Some(name) = identifier_from_declarator(inner, source) {
                            let ty = node.child_by_field_name("type");
                            let (params, is_variadic) = declarator
                                .child_by_field_name("parameters")
                                .map(|p| extract_params(p, source))
                                .unwrap_or_default();
                            let mut sym = Symbol::new(name, SymbolKind::Function, file_path, line_of(node));
                            sym.return_type = Some(type_str(ty, None, source));
                            sym.params = params;
                            sym.is_variadic = is_variadic;
                            out.push(sym);
                        }
                    }
                }
            }
        }
        "declaration" => {
            let is_extern = node
                .children(&mut node.walk())
                .any(|c| c.kind() == "storage_class_specifier" && text(c, source) == "extern");
            let ty = node.child_by_field_name("type");
            let mut cursor = node.walk();
            for child in node.children(&mut cursor) {
                let declarator = match child.kind() {
                    "identifier" | "pointer_declarator" | "array_declarator" => Some(child),
                    "init_declarator" => child.child_by_field_name("declarator"),
                    _ => None,
                };
                let Some(declarator) = declarator else { continue };
                let Some(name) = identifier_from_declarator(declarator, source) else { continue };

                let is_array = is_array_declarator(declarator);
                let kind = if is_array { SymbolKind::Array } else { SymbolKind::Variable };
                let mut sym = Symbol::new(name.clone(), kind, file_path, line_of(node));
                sym.type_ = Some(type_str(ty, Some(declarator), source));
                sym.is_extern = is_extern;
                sym.array_size = array_size(declarator, source);

                if sym.array_size.is_none() && is_array {
                    let line_text = source.lines().nth(node.start_position().row).unwrap_or("");
                    if let Some(size) = regex_array_size_on_line(line_text, &name) {
                        sym.array_size = Some(size);
                        sym.kind = SymbolKind::Array;
                    }
                }
                out.push(sym);
            }
        }
        "struct_specifier" => {
            if let (Some(name_node), Some(body)) =
                (node.child_by_field_name("name"), node.child_by_field_name("body"))
            {
                let name = text(name_node, source).to_string();
                let mut sym = Symbol::new(name, SymbolKind::Struct, file_path, line_of(node));
                let mut cursor = body.walk();
                for field in body.children(&mut cursor) {
                    if field.kind() != "field_declaration" {
                        continue;
                    }
                    let ty = field.child_by_field_name("type");
                    let mut fcursor = field.walk();
                    for decl in field.children(&mut fcursor) {
                        let declarator = match decl.kind() {
                            "field_identifier" | "pointer_declarator" | "array_declarator" => Some(decl),
                            _ => None,
                        };
                        let Some(declarator) = declarator else { continue };
                        if let Some(fname) = identifier_from_declarator(declarator, source) {
                            sym.members.push(Member {
                                name: fname,
                                type_: Some(type_str(ty, Some(declarator), source)),
                            });
                        }
                    }
                }
                out.push(sym);
            }
        }
        _ => {}
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        walk_symbols(child, source, file_path, out);
    }
}

fn regex_array_size_on_line(line: &str, name: &str) -> Option<i64> {
    let pattern = Regex::new(&format!(r"\b{}\s*\[(\d+)\]", regex::escape(name))).ok()?;
    pattern.captures(line)?.get(1)?.as_str().parse().ok()
}

fn infer_c_expr_type(node: Node, source: &str) -> Option<String> {
    match node.kind() {
        "number_literal" => {
            let t = text(node, source);
            if t.contains('.') || t.to_lowercase().contains('e') || t.to_lowercase().ends_with('f') {
                Some("float".to_string())
            } else {
                Some("int".to_string())
            }
        }
        "char_literal" => Some("char".to_string()),
        "string_literal" => Some("char".to_string()),
        "identifier" => None,
        _ => {
            let mut cursor = node.walk();
            for child in node.children(&mut cursor) {
                if let Some(t) = infer_c_expr_type(child, source) {
                    return Some(t);
                }
            }
            Some("int".to_string())
        }
    }
}

fn walk_references(node: Node, source: &str, out: &mut Vec<Reference>) {
    match node.kind() {
        "call_expression" => {
            if let (Some(func), Some(args)) =
                (node.child_by_field_name("function"), node.child_by_field_name("arguments"))
            {
                let name = text(func, source).to_string();
                let arg_nodes: Vec<Node> = args
                    .children(&mut args.walk())
                    .filter(|c| c.is_named())
                    .collect();

                let arg_types = arg_nodes.iter().map(|a| infer_c_expr_type(*a, source)).collect();
                out.push(Reference::Call {
                    name: name.clone(),
                    line: line_of(node),
                    arg_count: arg_nodes.len(),
                    arg_types,
                });

                if let Some(fmt_idx) = format_arg_index(&name) {
                    if let Some(fmt_arg) = arg_nodes.get(fmt_idx) {
                        if fmt_arg.kind() == "string_literal" {
                            let fmt_text = text(*fmt_arg, source);
                            let specifiers = FORMAT_SPECIFIER.find_iter(fmt_text).count();
                            let actual_fmt_args = arg_nodes.len().saturating_sub(fmt_idx + 1);
                            out.push(Reference::FormatCall {
                                name,
                                line: line_of(node),
                                format_specifiers: specifiers,
                                arg_count: actual_fmt_args,
                            });
                        }
                    }
                }
            }
        }
        "subscript_expression" => {
            let (array, index) = (node.child_by_field_name("argument"), node.child_by_field_name("index"));
            let (array, index) = match (array, index) {
                (Some(a), Some(i)) => (Some(a), Some(i)),
                _ => {
                    let children: Vec<Node> = node.children(&mut node.walk()).collect();
                    (children.first().copied(), children.get(2).copied())
                }
            };
            if let Some(array) = array {
                if let Some(name) = identifier_from_declarator(array, source).or_else(|| {
                    (array.kind() == "identifier").then(|| text(array, source).to_string())
                }) {
                    let is_write = node
                        .parent()
                        .is_some_and(|p| p.kind() == "assignment_expression" && p.child_by_field_name("left") == Some(node));
                    if !is_write {
                        let index_value = index.and_then(|i| {
                            (i.kind() == "number_literal").then(|| text(i, source).parse().ok()).flatten()
                        });
                        out.push(Reference::ArrayAccess { name, line: line_of(node), index_value });
                    }
                }
            }
        }
        "assignment_expression" => {
            if let (Some(left), Some(right)) =
                (node.child_by_field_name("left"), node.child_by_field_name("right"))
            {
                if left.kind() == "subscript_expression" {
                    if let Some(array) = left.child_by_field_name("argument") {
                        if let Some(name) = (array.kind() == "identifier").then(|| text(array, source).to_string()) {
                            let rhs_name = (right.kind() == "identifier").then(|| text(right, source).to_string());
                            let inferred_type = infer_c_expr_type(right, source);
                            out.push(Reference::ArrayWrite {
                                name,
                                line: line_of(node),
                                inferred_type,
                                rhs_name,
                            });
                        }
                    }
                }
            }
        }
        "field_expression" => {
            if let (Some(obj), Some(field)) =
                (node.child_by_field_name("argument"), node.child_by_field_name("field"))
            {
                if let Some(object) = identifier_from_declarator(obj, source)
                    .or_else(|| (obj.kind() == "identifier").then(|| text(obj, source).to_string()))
                {
                    out.push(Reference::MemberAccess {
                        line: line_of(node),
                        object,
                        member_name: text(field, source).to_string(),
                    });
                }
            }
        }
        _ => {}
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        walk_references(child, source, out);
    }
}

/// Regex fallback for array accesses tree-sitter's grammar doesn't expose
/// cleanly (e.g. through macros). Only adds accesses not already found by
/// the tree walk, and never inside a comment/string or a declarator.
fn append_subscript_fallback(
    source: &str,
    symbols: &[Symbol],
    existing: &[Reference],
    out: &mut Vec<Reference>,
) {
    let ranges = c_lexer::comment_and_string_ranges(source);
    let mut seen: std::collections::HashSet<(String, u32, Option<i64>)> = existing
        .iter()
        .filter_map(|r| match r {
            Reference::ArrayAccess { name, line, index_value } => {
                Some((name.clone(), *line, *index_value))
            }
            _ => None,
        })
        .collect();

    for sym in symbols.iter().filter(|s| s.kind == SymbolKind::Array) {
        let pattern = match Regex::new(&format!(r"\b{}\s*\[(\d+)\]", regex::escape(&sym.name))) {
            Ok(p) => p,
            Err(_) => continue,
        };
        for (line_idx, line_text) in source.lines().enumerate() {
            let line_start: usize = source
                .lines()
                .take(line_idx)
                .map(|l| l.len() + 1)
                .sum();
            for m in pattern.find_iter(line_text) {
                let abs_pos = line_start + m.start();
                if c_lexer::position_in_ranges(abs_pos, &ranges) {
                    continue;
                }
                let abs_end = line_start + m.end();
                if c_lexer::is_declarator_context(source, abs_end) {
                    continue;
                }
                let index_value: Option<i64> = pattern
                    .captures(m.as_str())
                    .and_then(|c| c.get(1))
                    .and_then(|g| g.as_str().parse().ok());
                let line = (line_idx + 1) as u32;
                let key = (sym.name.clone(), line, index_value);
                if seen.insert(key) {
                    out.push(Reference::ArrayAccess {
                        name: sym.name.clone(),
                        line,
                        index_value,
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_function_and_params() {
        let src = "int add(int a, int b) {\n  return a + b;\n}\n";
        let (symbols, _) = extract(src, "test.c").unwrap();
        let f = symbols.iter().find(|s| s.name == "add").unwrap();
        assert_eq!(f.kind, SymbolKind::Function);
        assert_eq!(f.params.len(), 2);
        assert_eq!(f.return_type.as_deref(), Some("int"));
    }

    #[test]
    fn extracts_array_with_size() {
        let src = "int buf[10];\n";
        let (symbols, _) = extract(src, "test.c").unwrap();
        let a = symbols.iter().find(|s| s.name == "buf").unwrap();
        assert_eq!(a.kind, SymbolKind::Array);
        assert_eq!(a.array_size, Some(10));
    }

    #[test]
    fn extracts_extern_declaration() {
        let src = "extern int counter;\n";
        let (symbols, _) = extract(src, "test.c").unwrap();
        let v = symbols.iter().find(|s| s.name == "counter").unwrap();
        assert!(v.is_extern);
    }

    #[test]
    fn extracts_struct_members() {
        let src = "struct Point {\n  int x;\n  int y;\n};\n";
        let (symbols, _) = extract(src, "test.h").unwrap();
        let s = symbols.iter().find(|s| s.name == "Point").unwrap();
        assert_eq!(s.members.len(), 2);
    }

    #[test]
    fn format_call_counts_specifiers() {
        let src = "int main() {\n  printf(\"%d %s\\n\", 1, \"x\");\n}\n";
        let (_, refs) = extract(src, "test.c").unwrap();
        let fmt = refs
            .iter()
            .find(|r| matches!(r, Reference::FormatCall { .. }))
            .unwrap();
        if let Reference::FormatCall { format_specifiers, arg_count, .. } = fmt {
            assert_eq!(*format_specifiers, 2);
            assert_eq!(*arg_count, 2);
        }
    }

    #[test]
    fn format_call_is_emitted_alongside_the_ordinary_call() {
        let src = "int main() {\n  printf(\"%d\\n\", 1);\n}\n";
        let (_, refs) = extract(src, "test.c").unwrap();
        assert!(refs.iter().any(|r| matches!(r, Reference::Call { name, .. } if name == "printf")));
        assert!(refs.iter().any(|r| matches!(r, Reference::FormatCall { name, .. } if name == "printf")));
    }

    #[test]
    fn array_access_out_of_bounds_index_extracted() {
        let src = "int buf[5];\nint main() {\n  int x = buf[10];\n}\n";
        let (_, refs) = extract(src, "test.c").unwrap();
        assert!(refs.iter().any(
            |r| matches!(r, Reference::ArrayAccess { name, index_value: Some(10), .. } if name == "buf")
        ));
    }
}
