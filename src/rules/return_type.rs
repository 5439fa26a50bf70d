//! SNIPE_TYPE_MISMATCH for a `return` whose value's inferred type disagrees
//! with the enclosing function's declared return type. Script only — C
//! return types are checked at the declaration site, not per call.

use super::AnalysisContext;
use crate::language::Language;
use crate::model::{Diagnostic, Reference, Severity};

pub fn check(ctx: &AnalysisContext) -> Vec<Diagnostic> {
    if ctx.language != Language::Script {
        return Vec::new();
    }

    ctx.references
        .iter()
        .filter_map(|reference| {
            let Reference::ReturnValue { line, func_name, declared_return_type, return_value_type } = reference
            else {
                return None;
            };
            let declared = declared_return_type.as_ref()?.trim();
            let actual = return_value_type.as_ref()?.trim();
            (declared != actual).then(|| {
                Diagnostic::new(
                    ctx.file_path,
                    *line,
                    Severity::Error,
                    "SNIPE_TYPE_MISMATCH",
                    format!(
                        "'{}' is declared to return '{}' but this return yields '{}'.",
                        func_name.as_deref().unwrap_or("<anonymous>"),
                        declared,
                        actual
                    ),
                )
            })
        })
        .collect()
}
