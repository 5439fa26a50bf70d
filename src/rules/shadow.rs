//! SNIPE_SHADOWED_SYMBOL: a buffer-local variable in a non-empty scope
//! (i.e. inside a function) that reuses a module-level name, either from
//! the same buffer or from elsewhere in the repository.

use std::collections::HashSet;
use std::path::Path;

use super::AnalysisContext;
use crate::language::Language;
use crate::model::{Diagnostic, Severity, SymbolKind};

pub fn check(ctx: &AnalysisContext) -> Vec<Diagnostic> {
    if ctx.language != Language::Script {
        return Vec::new();
    }

    let module_level: HashSet<&str> = ctx
        .symbols
        .iter()
        .filter(|s| s.scope.is_empty() && s.kind == SymbolKind::Variable)
        .map(|s| s.name.as_str())
        .chain(
            ctx.repo
                .symbols
                .iter()
                .filter(|s| {
                    s.scope.is_empty()
                        && s.kind == SymbolKind::Variable
                        && Language::from_path(Path::new(&s.file_path)) == Some(Language::Script)
                })
                .map(|s| s.name.as_str()),
        )
        .collect();

    ctx.symbols
        .iter()
        .filter(|s| !s.scope.is_empty() && s.kind == SymbolKind::Variable && module_level.contains(s.name.as_str()))
        .map(|s| {
            Diagnostic::new(
                ctx.file_path,
                s.line,
                Severity::Warning,
                "SNIPE_SHADOWED_SYMBOL",
                format!("'{}' in scope '{}' shadows a module-level variable of the same name.", s.name, s.scope),
            )
        })
        .collect()
}
