//! The checker catalog: a fixed, independent set of pure functions, each
//! consuming the buffer's symbols/references plus the repository index and
//! producing zero or more diagnostics. `run_all` calls them in a fixed
//! order and deduplicates the combined output.

mod arg_type;
mod assignment;
mod bounds;
mod format_string;
mod return_type;
mod shadow;
mod signature;
mod struct_access;
mod type_mismatch;
mod undefined;
mod unsafe_fn;
mod unused;

use crate::index::RepoIndex;
use crate::language::Language;
use crate::model::{deduplicate, Diagnostic, Reference, Symbol};

pub struct AnalysisContext<'a> {
    pub file_path: &'a str,
    pub language: Language,
    pub symbols: &'a [Symbol],
    pub references: &'a [Reference],
    pub repo: &'a RepoIndex,
}

pub fn run_all(ctx: &AnalysisContext) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    diagnostics.extend(type_mismatch::check(ctx));
    diagnostics.extend(bounds::check(ctx));
    diagnostics.extend(signature::check(ctx));
    diagnostics.extend(undefined::check(ctx));
    diagnostics.extend(shadow::check(ctx));
    diagnostics.extend(format_string::check(ctx));
    diagnostics.extend(unused::check_unused_externs(ctx));
    diagnostics.extend(unused::check_dead_imports(ctx));
    diagnostics.extend(return_type::check(ctx));
    diagnostics.extend(unsafe_fn::check(ctx));
    diagnostics.extend(assignment::check(ctx));
    diagnostics.extend(arg_type::check(ctx));
    diagnostics.extend(struct_access::check(ctx));
    deduplicate(diagnostics)
}
