//! SNIPE_SIGNATURE_DRIFT: call-site argument count against the repository
//! definition's parameter list, accounting for defaulted parameters and
//! C variadic functions.

use std::path::Path;

use super::AnalysisContext;
use crate::index::is_same_file;
use crate::language::Language;
use crate::model::{Diagnostic, Reference, Severity, Symbol, SymbolKind};

pub fn check(ctx: &AnalysisContext) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for reference in ctx.references {
        let Reference::Call { name, line, arg_count, .. } = reference else { continue };
        if name.contains('.') {
            continue;
        }
        let Some(func) = pick_function(ctx, name) else { continue };

        let regular_params: Vec<_> = func.params.iter().filter(|p| !p.name.starts_with('*')).collect();
        let min_args = regular_params.iter().filter(|p| !p.has_default).count();
        let max_args = if func.is_variadic { None } else { Some(regular_params.len()) };

        let out_of_range = *arg_count < min_args || max_args.is_some_and(|max| *arg_count > max);
        if out_of_range {
            let expected = match max_args {
                None => format!("at least {min_args}"),
                Some(max) if max == min_args => format!("{min_args}"),
                Some(max) => format!("{min_args} to {max}"),
            };
            diagnostics.push(Diagnostic::new(
                ctx.file_path,
                *line,
                Severity::Error,
                "SNIPE_SIGNATURE_DRIFT",
                format!("'{name}' expects {expected} argument(s) but got {arg_count}."),
            ));
        }
    }
    diagnostics
}

fn pick_function<'a>(ctx: &'a AnalysisContext, name: &str) -> Option<&'a Symbol> {
    let in_language = |s: &&Symbol| Language::from_path(Path::new(&s.file_path)) == Some(ctx.language);
    ctx.repo
        .by_name(name)
        .filter(|s| s.kind == SymbolKind::Function)
        .filter(in_language)
        .find(|s| is_same_file(&s.file_path, ctx.file_path))
        .or_else(|| ctx.repo.by_name(name).filter(|s| s.kind == SymbolKind::Function).find(in_language))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::RepoIndex;
    use crate::language::Language;
    use crate::model::Param;

    #[test]
    fn defaulted_params_widen_the_acceptable_range() {
        let mut func = Symbol::new("connect", SymbolKind::Function, "net.c", 10);
        func.params = vec![
            Param { name: "host".into(), type_: Some("char*".into()), has_default: false },
            Param { name: "timeout".into(), type_: Some("int".into()), has_default: true },
        ];
        let repo = RepoIndex { symbols: vec![func] };
        let references = vec![Reference::Call {
            name: "connect".into(),
            line: 3,
            arg_count: 1,
            arg_types: vec![None],
        }];
        let ctx = AnalysisContext {
            file_path: "main.c",
            language: Language::C,
            symbols: &[],
            references: &references,
            repo: &repo,
        };
        assert!(check(&ctx).is_empty());

        let references = vec![Reference::Call {
            name: "connect".into(),
            line: 3,
            arg_count: 3,
            arg_types: vec![None, None, None],
        }];
        let ctx = AnalysisContext { references: &references, ..ctx };
        assert_eq!(check(&ctx).len(), 1);
    }
}
