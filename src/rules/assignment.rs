//! SNIPE_TYPE_MISMATCH for an annotated assignment whose declared type
//! disagrees with the literal on the right-hand side. Script only.

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
            let Reference::Assignment { name, line, annotation_type, inferred_type } = reference else {
                return None;
            };
            let annotation = annotation_type.as_ref()?;
            let inferred = inferred_type.as_ref()?;
            (annotation != inferred).then(|| {
                Diagnostic::new(
                    ctx.file_path,
                    *line,
                    Severity::Error,
                    "SNIPE_TYPE_MISMATCH",
                    format!("variable '{name}' is annotated as '{annotation}' but assigned a value of type '{inferred}'."),
                )
            })
        })
        .collect()
}
