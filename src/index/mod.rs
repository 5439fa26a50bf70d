//! The repository-wide symbol index: a one-shot scan of every supported
//! file under a workspace root, aggregated in memory and persisted as a
//! JSON snapshot. Parsing each file is independent, so the scan is the one
//! place this crate parallelizes (with `rayon`).

pub mod persistence;
pub mod walker;

use rayon::prelude::*;
use std::path::Path;

use crate::config::Settings;
use crate::error::{IndexError, IndexResult};
use crate::extract;
use crate::model::Symbol;
use persistence::IndexPersistence;
use walker::FileWalker;

#[derive(Debug, Clone, Default)]
pub struct RepoIndex {
    pub symbols: Vec<Symbol>,
}

impl RepoIndex {
    /// Walks `root`, extracts symbols from every supported file, and
    /// persists the aggregate snapshot under `root.join(settings.index_path)`.
    pub fn build(root: &Path, settings: &Settings) -> IndexResult<Self> {
        if !root.is_dir() {
            return Err(IndexError::InvalidRoot { path: root.to_path_buf() });
        }

        let walker = FileWalker::new(root, settings.ignore.clone()).with_languages(settings.languages.clone());
        let files = walker.walk();

        let symbols: Vec<Symbol> = files
            .par_iter()
            .flat_map(|rel_path| {
                let abs_path = root.join(rel_path);
                match std::fs::read_to_string(&abs_path) {
                    Ok(source) => {
                        let rel_str = rel_path.to_string_lossy().to_string();
                        let outcome = extract::extract(&source, &rel_str);
                        outcome
                            .symbols
                            .into_iter()
                            .map(|mut s| {
                                s.file_path = rel_str.clone();
                                s
                            })
                            .collect::<Vec<_>>()
                    }
                    Err(e) => {
                        tracing::warn!(file = %abs_path.display(), error = %e, "skipping unreadable file");
                        Vec::new()
                    }
                }
            })
            .collect();

        tracing::info!(files = files.len(), symbols = symbols.len(), "workspace scan complete");

        let index = Self { symbols };
        let persistence = IndexPersistence::new(root.join(&settings.index_path));
        persistence.save_symbols(&index.symbols)?;

        Ok(index)
    }

    pub fn load(root: &Path, settings: &Settings) -> IndexResult<Self> {
        let persistence = IndexPersistence::new(root.join(&settings.index_path));
        Ok(Self { symbols: persistence.load_symbols()? })
    }

    pub fn by_name<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Symbol> {
        self.symbols.iter().filter(move |s| s.name == name)
    }

    /// Prefers an actual definition over an `extern` declaration, and a
    /// symbol defined outside `exclude_file` (the buffer's own file) over
    /// one defined inside it, matching the extractor's original
    /// cross-file comparison rule.
    pub fn canonical_definition(&self, name: &str, exclude_file: Option<&str>) -> Option<&Symbol> {
        let candidates: Vec<&Symbol> = self
            .by_name(name)
            .filter(|s| exclude_file.is_none_or(|f| !is_same_file(&s.file_path, f)))
            .collect();

        candidates
            .iter()
            .find(|s| !s.is_extern)
            .or_else(|| candidates.first())
            .copied()
    }
}

/// Paths may be absolute or workspace-relative; compare by their final
/// component(s) so both forms line up. The shorter path must match at a
/// `/` boundary in the longer one, so `main.c` does not compare equal to
/// `ain.c` or `domain.c`.
pub fn is_same_file(a: &str, b: &str) -> bool {
    let a = a.trim_start_matches("./");
    let b = b.trim_start_matches("./");
    a == b || a.ends_with(&format!("/{b}")) || b.ends_with(&format!("/{a}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SymbolKind;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn is_same_file_respects_path_boundaries() {
        assert!(is_same_file("main.c", "main.c"));
        assert!(is_same_file("src/main.c", "main.c"));
        assert!(is_same_file("./main.c", "main.c"));
        assert!(!is_same_file("main.c", "ain.c"));
        assert!(!is_same_file("main.c", "domain.c"));
        assert!(!is_same_file("src/domain.c", "main.c"));
    }

    #[test]
    fn build_scans_and_persists() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.c"), "int counter;\n").unwrap();
        let settings = Settings::default();

        let index = RepoIndex::build(dir.path(), &settings).unwrap();
        assert!(index.symbols.iter().any(|s| s.name == "counter"));

        let reloaded = RepoIndex::load(dir.path(), &settings).unwrap();
        assert_eq!(index.symbols, reloaded.symbols);
    }

    #[test]
    fn canonical_definition_prefers_non_extern() {
        let mut extern_decl = Symbol::new("counter", SymbolKind::Variable, "b.c", 1);
        extern_decl.is_extern = true;
        let mut definition = Symbol::new("counter", SymbolKind::Variable, "a.c", 3);
        definition.is_extern = false;

        let index = RepoIndex { symbols: vec![extern_decl, definition] };
        let found = index.canonical_definition("counter", None).unwrap();
        assert!(!found.is_extern);
    }

    #[test]
    fn invalid_root_is_a_boundary_error() {
        let settings = Settings::default();
        let result = RepoIndex::build(Path::new("/does/not/exist"), &settings);
        assert!(matches!(result, Err(IndexError::InvalidRoot { .. })));
    }
}
