//! SNIPE_ARRAY_BOUNDS for literal-index accesses against a known array
//! size. A repo-wide definition (outside the current file) is preferred
//! over a buffer-local one, matching the extractor's canonicalization rule.

use std::path::Path;

use super::AnalysisContext;
use crate::index::is_same_file;
use crate::language::Language;
use crate::model::{Diagnostic, Reference, Severity};

pub fn check(ctx: &AnalysisContext) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for reference in ctx.references {
        let Reference::ArrayAccess { name, line, index_value: Some(index) } = reference else { continue };

        let repo_def = ctx.repo.by_name(name).find(|s| {
            s.array_size.is_some()
                && !is_same_file(&s.file_path, ctx.file_path)
                && Language::from_path(Path::new(&s.file_path)) == Some(ctx.language)
        });
        let buffer_def = ctx.symbols.iter().find(|s| &s.name == name && s.array_size.is_some());

        let Some(def) = repo_def.or(buffer_def) else { continue };
        let size = def.array_size.expect("filtered for array_size above");

        if *index < 0 || *index >= size {
            diagnostics.push(Diagnostic::new(
                ctx.file_path,
                *line,
                Severity::Error,
                "SNIPE_ARRAY_BOUNDS",
                format!(
                    "index {} is out of bounds for '{}' (size {}, declared at {}:{}).",
                    index, name, size, def.file_path, def.line
                ),
            ));
        }
    }
    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::RepoIndex;
    use crate::language::Language;
    use crate::model::{Symbol, SymbolKind};

    #[test]
    fn flags_index_at_and_past_size() {
        let mut arr = Symbol::new("buf", SymbolKind::Array, "a.c", 1);
        arr.array_size = Some(5);
        let symbols = vec![arr];
        let references = vec![
            Reference::ArrayAccess { name: "buf".into(), line: 4, index_value: Some(4) },
            Reference::ArrayAccess { name: "buf".into(), line: 5, index_value: Some(5) },
            Reference::ArrayAccess { name: "buf".into(), line: 6, index_value: Some(99) },
        ];
        let repo = RepoIndex::default();
        let ctx = AnalysisContext {
            file_path: "a.c",
            language: Language::C,
            symbols: &symbols,
            references: &references,
            repo: &repo,
        };
        let diagnostics = check(&ctx);
        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics.iter().all(|d| d.code == "SNIPE_ARRAY_BOUNDS"));
    }
}
