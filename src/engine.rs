//! The single owned state object replacing a mutable module-level cache:
//! one `AnalysisEngine`, one lock, one place a rebuild and a concurrent
//! analysis can interact. `analyze` only holds the lock long enough to
//! clone the current index `Arc`; the checker pipeline itself runs
//! lock-free against that snapshot.

use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::Settings;
use crate::error::{EngineError, EngineResult};
use crate::extract;
use crate::index::persistence::IndexPersistence;
use crate::index::RepoIndex;
use crate::language::Language;
use crate::model::{Diagnostic, Symbol};
use crate::rules::{self, AnalysisContext};

#[derive(Default)]
struct EngineState {
    workspace_root: Option<std::path::PathBuf>,
    index: Option<Arc<RepoIndex>>,
    last_diagnostics: Option<Vec<Diagnostic>>,
}

pub struct AnalysisEngine {
    settings: Settings,
    state: Mutex<EngineState>,
}

impl AnalysisEngine {
    pub fn new(settings: Settings) -> Self {
        Self { settings, state: Mutex::new(EngineState::default()) }
    }

    /// Rebuilds the repository index for `workspace_root` and replaces the
    /// engine's index wholesale (never merged with the prior one).
    pub fn refresh(&self, workspace_root: &Path) -> EngineResult<()> {
        let index = RepoIndex::build(workspace_root, &self.settings)?;
        let mut state = self.state.lock();
        state.workspace_root = Some(workspace_root.to_path_buf());
        state.index = Some(Arc::new(index));
        Ok(())
    }

    /// Analyzes an unsaved buffer. `file_path` need not exist on disk; it
    /// is only used for language dispatch and diagnostic attribution.
    pub fn analyze(&self, file_path: &str, content: &str) -> EngineResult<Vec<Diagnostic>> {
        let Some(language) = Language::from_path(Path::new(file_path)) else {
            return Ok(Vec::new());
        };
        if !self.settings.languages.enabled(language) {
            return Ok(Vec::new());
        }

        let (index, workspace_root) = {
            let state = self.state.lock();
            (state.index.clone().unwrap_or_default(), state.workspace_root.clone())
        };

        let outcome = extract::extract(content, file_path);
        let ctx = AnalysisContext {
            file_path,
            language,
            symbols: &outcome.symbols,
            references: &outcome.references,
            repo: &index,
        };
        let diagnostics = rules::run_all(&ctx);

        if let Some(root) = workspace_root {
            let persistence = IndexPersistence::new(root.join(&self.settings.index_path));
            if let Ok(json) = serde_json::to_string_pretty(&diagnostics) {
                if let Err(e) = persistence.save_diagnostics_snapshot(&json) {
                    tracing::warn!(error = %e, "failed to persist diagnostics snapshot");
                }
            }
        }

        self.state.lock().last_diagnostics = Some(diagnostics.clone());
        Ok(diagnostics)
    }

    /// All repository symbols sharing `name`, empty if no workspace has
    /// been indexed yet.
    pub fn get_symbols(&self, name: &str) -> Vec<Symbol> {
        self.state
            .lock()
            .index
            .as_ref()
            .map(|index| index.by_name(name).cloned().collect())
            .unwrap_or_default()
    }

    /// The diagnostics produced by the most recent `analyze` call in this
    /// engine's lifetime, if any.
    pub fn get_diagnostics_snapshot(&self) -> EngineResult<Vec<Diagnostic>> {
        self.state
            .lock()
            .last_diagnostics
            .clone()
            .ok_or(EngineError::NoWorkspace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn analyze_without_refresh_uses_an_empty_index() {
        let engine = AnalysisEngine::new(Settings::default());
        let diagnostics = engine.analyze("a.c", "int buf[5];\nint x = buf[10];\n").unwrap();
        assert!(diagnostics.iter().any(|d| d.code == "SNIPE_ARRAY_BOUNDS"));
    }

    #[test]
    fn refresh_then_analyze_sees_cross_file_definitions() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("data.c"), "int counter;\n").unwrap();

        let engine = AnalysisEngine::new(Settings::default());
        engine.refresh(dir.path()).unwrap();

        let diagnostics = engine.analyze("main.c", "extern float counter;\n").unwrap();
        assert!(diagnostics.iter().any(|d| d.code == "SNIPE_TYPE_MISMATCH"));

        let found = engine.get_symbols("counter");
        assert!(!found.is_empty());
    }

    #[test]
    fn disabled_language_is_skipped_by_refresh_and_analyze() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("data.c"), "int counter;\n").unwrap();

        let mut settings = Settings::default();
        settings.languages.c = false;
        let engine = AnalysisEngine::new(settings);
        engine.refresh(dir.path()).unwrap();

        assert!(engine.get_symbols("counter").is_empty());
        assert_eq!(engine.analyze("a.c", "int buf[5];\nint x = buf[10];\n").unwrap(), Vec::new());
    }
}
