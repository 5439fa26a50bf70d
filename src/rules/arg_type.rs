//! SNIPE_ARG_TYPE_MISMATCH: a call-site positional argument whose inferred
//! literal type disagrees with the callee's annotated parameter type.
//! Script only, and skipped for method calls (`obj.method(...)`) since
//! the extractor cannot resolve which class's method is being called.

use std::collections::HashMap;
use std::path::Path;

use super::AnalysisContext;
use crate::language::Language;
use crate::model::{Diagnostic, Reference, Severity, Symbol, SymbolKind};

pub fn check(ctx: &AnalysisContext) -> Vec<Diagnostic> {
    if ctx.language != Language::Script {
        return Vec::new();
    }

    let functions: HashMap<&str, &Symbol> = ctx
        .symbols
        .iter()
        .chain(
            ctx.repo
                .symbols
                .iter()
                .filter(|s| Language::from_path(Path::new(&s.file_path)) == Some(Language::Script)),
        )
        .filter(|s| s.kind == SymbolKind::Function)
        .map(|s| (s.name.as_str(), s))
        .collect();

    let mut diagnostics = Vec::new();
    for reference in ctx.references {
        let Reference::Call { name, line, arg_types, .. } = reference else { continue };
        if name.contains('.') {
            continue;
        }
        let Some(func) = functions.get(name.as_str()) else { continue };
        let regular_params: Vec<_> = func.params.iter().filter(|p| !p.name.starts_with('*')).collect();

        for (param, arg_type) in regular_params.iter().zip(arg_types.iter()) {
            let (Some(param_type), Some(arg_type)) = (&param.type_, arg_type) else { continue };
            if param_type != arg_type {
                diagnostics.push(Diagnostic::new(
                    ctx.file_path,
                    *line,
                    Severity::Error,
                    "SNIPE_ARG_TYPE_MISMATCH",
                    format!(
                        "argument '{}' of '{name}' expects type '{param_type}' but got '{arg_type}'.",
                        param.name
                    ),
                ));
            }
        }
    }
    diagnostics
}
