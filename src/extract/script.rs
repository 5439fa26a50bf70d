//! Symbol and reference extraction for the dynamically typed scripting
//! language (`.py`), optional type annotations included.

use tree_sitter::{Node, Parser};

use crate::error::{ExtractError, ExtractResult};
use crate::model::{Param, Reference, Symbol, SymbolKind};

fn parser() -> ExtractResult<Parser> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_python::LANGUAGE.into())
        .map_err(|_| ExtractError::ParserInit { language: "script" })?;
    Ok(parser)
}

pub fn extract(source: &str, file_path: &str) -> ExtractResult<(Vec<Symbol>, Vec<Reference>)> {
    let mut parser = parser()?;
    let tree = parser
        .parse(source, None)
        .ok_or_else(|| ExtractError::NoParseTree { path: file_path.into() })?;

    let mut symbols = Vec::new();
    walk_symbols(tree.root_node(), source, file_path, "", &mut symbols);

    let mut references = Vec::new();
    walk_references(tree.root_node(), source, &mut references);

    Ok((symbols, references))
}

fn text<'a>(node: Node, source: &'a str) -> &'a str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

fn line_of(node: Node) -> u32 {
    node.start_position().row as u32 + 1
}

fn first_identifier(node: Node, source: &str) -> Option<String> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .find(|c| c.kind() == "identifier")
        .map(|c| text(c, source).to_string())
}

/// Returns (name, type annotation, has_default, is_variadic) for a single
/// parameter node.
fn parse_param(node: Node, source: &str) -> Option<(String, Option<String>, bool, bool)> {
    match node.kind() {
        "identifier" => Some((text(node, source).to_string(), None, false, false)),
        "default_parameter" => node
            .child_by_field_name("name")
            .map(|n| (text(n, source).to_string(), None, true, false)),
        "typed_default_parameter" => node.child_by_field_name("name").map(|n| {
            let ty = node.child_by_field_name("type").map(|t| text(t, source).to_string());
            (text(n, source).to_string(), ty, true, false)
        }),
        "typed_parameter" => {
            let name = first_identifier(node, source)?;
            let ty = node.child_by_field_name("type").map(|t| text(t, source).to_string());
            Some((name, ty, false, false))
        }
        "list_splat_pattern" | "dictionary_splat_pattern" => {
            first_identifier(node, source).map(|n| (n, None, false, true))
        }
        _ => None,
    }
}

/// The literal-RHS type map the whole extractor shares: list/tuple/int
/// literal/float literal/string/bool/dict each have one known type name.
fn infer_type_from_literal(node: Node) -> Option<String> {
    match node.kind() {
        "list" => Some("list".to_string()),
        "tuple" => Some("tuple".to_string()),
        "integer" => Some("int".to_string()),
        "float" => Some("float".to_string()),
        "string" => Some("str".to_string()),
        "true" | "false" => Some("bool".to_string()),
        "dictionary" => Some("dict".to_string()),
        _ => None,
    }
}

fn walk_symbols(node: Node, source: &str, file_path: &str, scope: &str, out: &mut Vec<Symbol>) {
    match node.kind() {
        "function_definition" => {
            if let Some(name_node) = node.child_by_field_name("name") {
                let name = text(name_node, source).to_string();
                let mut sym = Symbol::new(name.clone(), SymbolKind::Function, file_path, line_of(node));
                sym.scope = scope.to_string();
                if let Some(params_node) = node.child_by_field_name("parameters") {
                    let mut cursor = params_node.walk();
                    for child in params_node.named_children(&mut cursor) {
                        if let Some((pname, ptype, has_default, is_variadic)) = parse_param(child, source) {
                            if pname == "self" || pname == "cls" {
                                continue;
                            }
                            if is_variadic {
                                sym.is_variadic = true;
                            }
                            sym.params.push(Param { name: pname, type_: ptype, has_default });
                        }
                    }
                }
                if let Some(rt) = node.child_by_field_name("return_type") {
                    sym.return_type = Some(text(rt, source).to_string());
                }
                out.push(sym);
                if let Some(body) = node.child_by_field_name("body") {
                    walk_symbols(body, source, file_path, &name, out);
                }
                return;
            }
        }
        "class_definition" => {
            if let Some(name_node) = node.child_by_field_name("name") {
                let name = text(name_node, source).to_string();
                let sym = Symbol::new(name.clone(), SymbolKind::Class, file_path, line_of(node));
                let mut sym = sym;
                sym.scope = scope.to_string();
                out.push(sym);
                if let Some(body) = node.child_by_field_name("body") {
                    walk_symbols(body, source, file_path, &name, out);
                }
                return;
            }
        }
        "assignment" => {
            let left = node.child_by_field_name("left");
            let right = node.child_by_field_name("right");
            let annotation = node.child_by_field_name("type").map(|n| text(n, source).to_string());

            if let Some(left) = left {
                match left.kind() {
                    "identifier" => {
                        let name = text(left, source).to_string();
                        if !name.starts_with('_') {
                            let inferred = right.and_then(infer_type_from_literal);
                            let is_collection = right.is_some_and(|r| matches!(r.kind(), "list" | "tuple"));
                            let mut sym = Symbol::new(
                                name,
                                if is_collection { SymbolKind::Array } else { SymbolKind::Variable },
                                file_path,
                                line_of(node),
                            );
                            sym.scope = scope.to_string();
                            sym.type_ = annotation.or(inferred);
                            if is_collection {
                                sym.array_size = right.map(|r| r.named_child_count() as i64);
                            }
                            out.push(sym);
                        }
                    }
                    "tuple_pattern" | "pattern_list" | "list_pattern" => {
                        let mut cursor = left.walk();
                        for child in left.named_children(&mut cursor) {
                            if child.kind() == "identifier" {
                                let name = text(child, source).to_string();
                                if !name.starts_with('_') {
                                    let mut sym =
                                        Symbol::new(name, SymbolKind::Variable, file_path, line_of(node));
                                    sym.scope = scope.to_string();
                                    out.push(sym);
                                }
                            }
                        }
                    }
                    _ => {}
                }
            }
        }
        _ => {}
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        walk_symbols(child, source, file_path, scope, out);
    }
}

fn enclosing_function<'a>(node: Node<'a>) -> Option<Node<'a>> {
    let mut current = node.parent();
    while let Some(n) = current {
        if n.kind() == "function_definition" {
            return Some(n);
        }
        current = n.parent();
    }
    None
}

fn walk_references(node: Node, source: &str, out: &mut Vec<Reference>) {
    match node.kind() {
        "call" => {
            if let (Some(func), Some(args)) =
                (node.child_by_field_name("function"), node.child_by_field_name("arguments"))
            {
                let name = text(func, source).to_string();
                let arg_nodes: Vec<Node> = args.named_children(&mut args.walk()).collect();
                let arg_types = arg_nodes.iter().map(|a| infer_type_from_literal(*a)).collect();
                out.push(Reference::Call {
                    name,
                    line: line_of(node),
                    arg_count: arg_nodes.len(),
                    arg_types,
                });
            }
        }
        "subscript" => {
            if let Some(value) = node.child_by_field_name("value") {
                if value.kind() == "identifier" {
                    let name = text(value, source).to_string();
                    let index_value = node.child_by_field_name("subscript").and_then(|i| {
                        (i.kind() == "integer").then(|| text(i, source).parse().ok()).flatten()
                    });
                    out.push(Reference::ArrayAccess { name, line: line_of(node), index_value });
                }
            }
        }
        "identifier" => {
            let name = text(node, source);
            if !name.starts_with('_') {
                if let Some(parent) = node.parent() {
                    let skip = matches!(
                        parent.kind(),
                        "call" | "function_definition" | "parameters" | "attribute"
                    );
                    if !skip {
                        out.push(Reference::Read { name: name.to_string(), line: line_of(node) });
                    }
                }
            }
        }
        "import_statement" => {
            let mut imported_names = Vec::new();
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                match child.kind() {
                    "dotted_name" => {
                        if let Some(first) = child.named_child(0) {
                            imported_names.push(text(first, source).to_string());
                        }
                    }
                    "aliased_import" => {
                        if let Some(alias) = child.child_by_field_name("alias") {
                            imported_names.push(text(alias, source).to_string());
                        }
                    }
                    _ => {}
                }
            }
            out.push(Reference::Import {
                line: line_of(node),
                imported_names,
                module_name: None,
                is_wildcard: false,
            });
        }
        "import_from_statement" => {
            let module_name = node
                .child_by_field_name("module_name")
                .map(|n| text(n, source).to_string());
            let mut imported_names = Vec::new();
            let mut is_wildcard = false;
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                match child.kind() {
                    "dotted_name" => imported_names.push(text(child, source).to_string()),
                    "aliased_import" => {
                        if let Some(alias) = child.child_by_field_name("alias") {
                            imported_names.push(text(alias, source).to_string());
                        }
                    }
                    "wildcard_import" => {
                        is_wildcard = true;
                        imported_names.push("*".to_string());
                    }
                    _ => {}
                }
            }
            out.push(Reference::Import { line: line_of(node), imported_names, module_name, is_wildcard });
        }
        "return_statement" => {
            let func = enclosing_function(node);
            let func_name = func
                .and_then(|f| f.child_by_field_name("name"))
                .map(|n| text(n, source).to_string());
            let declared_return_type = func
                .and_then(|f| f.child_by_field_name("return_type"))
                .map(|n| text(n, source).to_string());
            let return_value_type = node
                .named_child(0)
                .and_then(infer_type_from_literal)
                .or_else(|| node.named_child(0).is_none().then(|| "None".to_string()));
            out.push(Reference::ReturnValue {
                line: line_of(node),
                func_name,
                declared_return_type,
                return_value_type,
            });
        }
        "assignment" => {
            if let (Some(left), Some(right), Some(annotation)) = (
                node.child_by_field_name("left"),
                node.child_by_field_name("right"),
                node.child_by_field_name("type"),
            ) {
                if left.kind() == "identifier" {
                    if let Some(inferred) = infer_type_from_literal(right) {
                        out.push(Reference::Assignment {
                            name: text(left, source).to_string(),
                            line: line_of(node),
                            annotation_type: Some(text(annotation, source).to_string()),
                            inferred_type: Some(inferred),
                        });
                    }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_function_with_defaults_and_variadic() {
        let src = "def greet(name, greeting='hi', *args, **kwargs):\n    return greeting\n";
        let (symbols, _) = extract(src, "t.py").unwrap();
        let f = symbols.iter().find(|s| s.name == "greet").unwrap();
        assert_eq!(f.params.len(), 2);
        assert!(f.is_variadic);
    }

    #[test]
    fn drops_self_parameter() {
        let src = "class Foo:\n    def bar(self, x):\n        return x\n";
        let (symbols, _) = extract(src, "t.py").unwrap();
        let m = symbols.iter().find(|s| s.name == "bar").unwrap();
        assert_eq!(m.params.len(), 1);
        assert_eq!(m.scope, "Foo");
    }

    #[test]
    fn list_assignment_becomes_array_symbol() {
        let src = "items = [1, 2, 3]\n";
        let (symbols, _) = extract(src, "t.py").unwrap();
        let s = symbols.iter().find(|s| s.name == "items").unwrap();
        assert_eq!(s.kind, SymbolKind::Array);
        assert_eq!(s.array_size, Some(3));
    }

    #[test]
    fn underscore_prefixed_targets_are_skipped() {
        let src = "_private = 1\n";
        let (symbols, _) = extract(src, "t.py").unwrap();
        assert!(symbols.iter().all(|s| s.name != "_private"));
    }

    #[test]
    fn annotated_assignment_mismatch_reference_emitted() {
        let src = "x: str = 5\n";
        let (_, refs) = extract(src, "t.py").unwrap();
        assert!(refs.iter().any(|r| matches!(
            r,
            Reference::Assignment { annotation_type: Some(a), inferred_type: Some(i), .. }
                if a == "str" && i == "int"
        )));
    }

    #[test]
    fn wildcard_import_is_flagged() {
        let src = "from os import *\n";
        let (_, refs) = extract(src, "t.py").unwrap();
        assert!(refs.iter().any(|r| matches!(r, Reference::Import { is_wildcard: true, .. })));
    }
}
