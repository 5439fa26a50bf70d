//! SNIPE_TYPE_MISMATCH (declarations) + SNIPE_ARRAY_BOUNDS (extern size
//! overclaim). The most involved checker: it reconciles the buffer's
//! `extern` declarations against the repository's canonical definitions,
//! then checks array-write RHS types against the array's declared element
//! type.
//!
//! A bare read or array access carries no inferred type of its own in this
//! model (only `array_write` and annotated `assignment` references do), so
//! unlike the original extractor this checker does not attempt a third
//! pass over reads — there is nothing to compare without guessing, and
//! guessing is exactly what this catalog avoids.

use std::collections::HashSet;

use super::AnalysisContext;
use crate::model::{Diagnostic, Reference, Severity};

pub fn check(ctx: &AnalysisContext) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let mut flagged: HashSet<String> = HashSet::new();

    for sym in ctx.symbols.iter().filter(|s| s.is_extern) {
        let Some(def) = ctx.repo.canonical_definition(&sym.name, Some(ctx.file_path)) else { continue };
        if def.is_extern {
            continue;
        }

        if let (Some(buf_type), Some(def_type)) = (&sym.type_, &def.type_) {
            if buf_type != def_type {
                flagged.insert(sym.name.clone());
                diagnostics.push(Diagnostic::new(
                    ctx.file_path,
                    sym.line,
                    Severity::Error,
                    "SNIPE_TYPE_MISMATCH",
                    format!(
                        "'{}' is declared extern as '{}' here but defined as '{}' in '{}'.",
                        sym.name, buf_type, def_type, def.file_path
                    ),
                ));
            }
        }

        if let (Some(buf_size), Some(def_size)) = (sym.array_size, def.array_size) {
            if buf_size > def_size {
                diagnostics.push(Diagnostic::new(
                    ctx.file_path,
                    sym.line,
                    Severity::Error,
                    "SNIPE_ARRAY_BOUNDS",
                    format!(
                        "extern declaration of '{}' claims size {} but '{}' defines size {}.",
                        sym.name, buf_size, def.file_path, def_size
                    ),
                ));
            }
        }
    }

    let local_types: std::collections::HashMap<&str, Option<&String>> =
        ctx.symbols.iter().map(|s| (s.name.as_str(), s.type_.as_ref())).collect();

    for reference in ctx.references {
        let Reference::ArrayWrite { name, line, inferred_type, rhs_name } = reference else { continue };
        if flagged.contains(name) {
            continue;
        }

        let declared = ctx
            .symbols
            .iter()
            .find(|s| &s.name == name)
            .and_then(|s| s.type_.as_ref())
            .or_else(|| ctx.repo.canonical_definition(name, Some(ctx.file_path)).and_then(|d| d.type_.as_ref()));

        let rhs_type = inferred_type
            .as_ref()
            .or_else(|| rhs_name.as_ref().and_then(|n| local_types.get(n.as_str()).copied().flatten()));

        if let (Some(declared), Some(rhs_type)) = (declared, rhs_type) {
            let declared_elem = declared.trim_end_matches('*').trim();
            if declared_elem != rhs_type {
                diagnostics.push(Diagnostic::new(
                    ctx.file_path,
                    *line,
                    Severity::Error,
                    "SNIPE_TYPE_MISMATCH",
                    format!(
                        "array '{}' holds '{}' but is assigned a value of type '{}'.",
                        name, declared_elem, rhs_type
                    ),
                ));
            }
        }
    }

    diagnostics
}
