//! SNIPE_UNUSED_EXTERN (C/header) and SNIPE_DEAD_IMPORT (script) — two
//! checks sharing the theme "declared but never used", kept in one module
//! the way the extractor's original `unused_checker` paired them.

use std::collections::HashSet;

use super::AnalysisContext;
use crate::language::Language;
use crate::model::{Diagnostic, Reference, Severity};

pub fn check_unused_externs(ctx: &AnalysisContext) -> Vec<Diagnostic> {
    if ctx.language != Language::C {
        return Vec::new();
    }

    let referenced_names: HashSet<&str> = ctx
        .references
        .iter()
        .filter_map(|r| match r {
            Reference::Call { name, .. } => Some(name.as_str()),
            Reference::Read { name, .. } => Some(name.as_str()),
            Reference::ArrayAccess { name, .. } => Some(name.as_str()),
            Reference::ArrayWrite { name, .. } => Some(name.as_str()),
            _ => None,
        })
        .collect();

    ctx.symbols
        .iter()
        .filter(|s| s.is_extern && !referenced_names.contains(s.name.as_str()))
        .map(|s| {
            Diagnostic::new(
                ctx.file_path,
                s.line,
                Severity::Warning,
                "SNIPE_UNUSED_EXTERN",
                format!("'{}' is declared extern but never referenced in this file.", s.name),
            )
        })
        .collect()
}

pub fn check_dead_imports(ctx: &AnalysisContext) -> Vec<Diagnostic> {
    if ctx.language != Language::Script {
        return Vec::new();
    }

    let used_names: HashSet<&str> = ctx
        .references
        .iter()
        .filter_map(|r| match r {
            Reference::Import { .. } => None,
            Reference::Call { name, .. } => Some(name.as_str()),
            Reference::Read { name, .. } => Some(name.as_str()),
            Reference::ArrayAccess { name, .. } => Some(name.as_str()),
            Reference::Assignment { name, .. } => Some(name.as_str()),
            _ => None,
        })
        .collect();

    let mut diagnostics = Vec::new();
    for reference in ctx.references {
        let Reference::Import { line, imported_names, .. } = reference else { continue };
        for name in imported_names {
            if name == "*" {
                continue;
            }
            if !used_names.contains(name.as_str()) {
                diagnostics.push(Diagnostic::new(
                    ctx.file_path,
                    *line,
                    Severity::Warning,
                    "SNIPE_DEAD_IMPORT",
                    format!("'{name}' is imported but never used."),
                ));
            }
        }
    }
    diagnostics
}
