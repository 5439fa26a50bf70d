//! SNIPE_STRUCT_ACCESS: `obj.field` where `obj`'s struct type is known but
//! `field` isn't one of its members. C/header files only; silent when the
//! struct's definition can't be found at all.

use std::collections::HashMap;

use super::AnalysisContext;
use crate::language::Language;
use crate::model::{Diagnostic, Reference, Severity, Symbol};

pub fn check(ctx: &AnalysisContext) -> Vec<Diagnostic> {
    if ctx.language != Language::C {
        return Vec::new();
    }

    let var_types: HashMap<&str, &str> = ctx
        .symbols
        .iter()
        .chain(ctx.repo.symbols.iter())
        .filter_map(|s| s.type_.as_deref().map(|t| (s.name.as_str(), t)))
        .collect();

    let struct_members: HashMap<&str, &Symbol> = ctx
        .symbols
        .iter()
        .chain(ctx.repo.symbols.iter())
        .filter(|s| s.kind == crate::model::SymbolKind::Struct)
        .map(|s| (s.name.as_str(), s))
        .collect();

    let mut diagnostics = Vec::new();
    for reference in ctx.references {
        let Reference::MemberAccess { line, object, member_name } = reference else { continue };
        let Some(var_type) = var_types.get(object.as_str()) else { continue };
        let Some(struct_name) = var_type.strip_prefix("struct ") else { continue };
        let struct_name = struct_name.trim_end_matches('*').trim();
        let Some(def) = struct_members.get(struct_name) else { continue };

        if !def.members.iter().any(|m| m.name == *member_name) {
            let mut available: Vec<&str> = def.members.iter().map(|m| m.name.as_str()).collect();
            available.sort_unstable();
            diagnostics.push(Diagnostic::new(
                ctx.file_path,
                *line,
                Severity::Error,
                "SNIPE_STRUCT_ACCESS",
                format!(
                    "'struct {}' has no member '{}'. Available: {}.",
                    struct_name,
                    member_name,
                    available.join(", ")
                ),
            ));
        }
    }
    diagnostics
}
