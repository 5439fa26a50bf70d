//! Workspace file walker. Grounded on the teacher's `ignore::WalkBuilder`
//! usage: respect `.gitignore`, skip hidden entries, and additionally skip
//! a fixed set of directories that are never worth scanning regardless of
//! VCS ignore state.

use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

use crate::config::LanguagesConfig;
use crate::language::Language;

const DEFAULT_IGNORE: &[&str] = &[
    ".git",
    "node_modules",
    "__pycache__",
    ".venv",
    "venv",
    "dist",
    "build",
    ".eggs",
    ".tox",
    ".mypy_cache",
    ".pytest_cache",
    "vendor",
];

pub struct FileWalker {
    root: PathBuf,
    extra_ignore: Vec<String>,
    languages: LanguagesConfig,
}

impl FileWalker {
    pub fn new(root: impl Into<PathBuf>, extra_ignore: Vec<String>) -> Self {
        Self { root: root.into(), extra_ignore, languages: LanguagesConfig::default() }
    }

    pub fn with_languages(mut self, languages: LanguagesConfig) -> Self {
        self.languages = languages;
        self
    }

    fn is_ignored_component(&self, name: &str) -> bool {
        DEFAULT_IGNORE.contains(&name)
            || name.ends_with(".egg-info")
            || self.extra_ignore.iter().any(|p| p == name)
    }

    /// Returns the workspace-relative paths of every file in a supported
    /// language, skipping ignored directories.
    pub fn walk(&self) -> Vec<PathBuf> {
        let mut out = Vec::new();
        let walker = WalkBuilder::new(&self.root).hidden(true).git_ignore(true).build();

        for entry in walker.flatten() {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if path
                .components()
                .any(|c| self.is_ignored_component(&c.as_os_str().to_string_lossy()))
            {
                continue;
            }
            let Some(language) = Language::from_path(path) else { continue };
            if !self.languages.enabled(language) {
                continue;
            }
            if let Ok(rel) = path.strip_prefix(&self.root) {
                out.push(rel.to_path_buf());
            }
        }
        out
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn walks_supported_files_and_skips_ignored_dirs() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("main.c"), "int main() {}").unwrap();
        fs::write(dir.path().join("util.py"), "x = 1").unwrap();
        fs::write(dir.path().join("notes.txt"), "hi").unwrap();
        fs::create_dir(dir.path().join("node_modules")).unwrap();
        fs::write(dir.path().join("node_modules/skip.py"), "x = 1").unwrap();

        let walker = FileWalker::new(dir.path(), vec![]);
        let found = walker.walk();
        assert!(found.contains(&PathBuf::from("main.c")));
        assert!(found.contains(&PathBuf::from("util.py")));
        assert!(!found.iter().any(|p| p.to_string_lossy().contains("notes.txt")));
        assert!(!found.iter().any(|p| p.to_string_lossy().contains("node_modules")));
    }
}
