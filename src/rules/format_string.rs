//! SNIPE_FORMAT_STRING: a printf-family format string whose specifier
//! count doesn't match the number of variadic arguments actually passed.
//! C/header files only.

use super::AnalysisContext;
use crate::language::Language;
use crate::model::{Diagnostic, Reference, Severity};

pub fn check(ctx: &AnalysisContext) -> Vec<Diagnostic> {
    if ctx.language != Language::C {
        return Vec::new();
    }

    ctx.references
        .iter()
        .filter_map(|reference| {
            let Reference::FormatCall { name, line, format_specifiers, arg_count } = reference else {
                return None;
            };
            (format_specifiers != arg_count).then(|| {
                Diagnostic::new(
                    ctx.file_path,
                    *line,
                    Severity::Error,
                    "SNIPE_FORMAT_STRING",
                    format!(
                        "'{name}' format string expects {format_specifiers} argument(s) but {arg_count} were passed."
                    ),
                )
            })
        })
        .collect()
}
