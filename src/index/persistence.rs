//! Atomic JSON persistence for the repository symbol table, mirroring the
//! teacher's write-to-temp-then-rename pattern.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{IndexError, IndexResult};
use crate::model::Symbol;

pub struct IndexPersistence {
    base_path: PathBuf,
}

impl IndexPersistence {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self { base_path: base_path.into() }
    }

    fn symbols_path(&self) -> PathBuf {
        self.base_path.join("repo_symbols.json")
    }

    pub fn diagnostics_path(&self) -> PathBuf {
        self.base_path.join("diagnostics.json")
    }

    pub fn save_symbols(&self, symbols: &[Symbol]) -> IndexResult<()> {
        fs::create_dir_all(&self.base_path).map_err(|e| IndexError::FileWrite {
            path: self.base_path.clone(),
            source: e,
        })?;

        let data = serde_json::to_vec_pretty(symbols)?;
        let target = self.symbols_path();
        let temp = target.with_extension("json.tmp");
        fs::write(&temp, &data).map_err(|e| IndexError::FileWrite { path: temp.clone(), source: e })?;
        fs::rename(&temp, &target).map_err(|e| IndexError::FileWrite { path: target.clone(), source: e })?;
        Ok(())
    }

    pub fn load_symbols(&self) -> IndexResult<Vec<Symbol>> {
        let path = self.symbols_path();
        let data = fs::read(&path).map_err(|e| IndexError::FileRead { path: path.clone(), source: e })?;
        Ok(serde_json::from_slice(&data)?)
    }

    pub fn exists(&self) -> bool {
        self.symbols_path().exists()
    }

    pub fn save_diagnostics_snapshot(&self, json: &str) -> IndexResult<()> {
        fs::create_dir_all(&self.base_path).map_err(|e| IndexError::FileWrite {
            path: self.base_path.clone(),
            source: e,
        })?;
        let target = self.diagnostics_path();
        let temp = target.with_extension("json.tmp");
        fs::write(&temp, json.as_bytes()).map_err(|e| IndexError::FileWrite { path: temp.clone(), source: e })?;
        fs::rename(&temp, &target).map_err(|e| IndexError::FileWrite { path: target.clone(), source: e })?;
        Ok(())
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SymbolKind;
    use tempfile::TempDir;

    #[test]
    fn round_trips_symbols() {
        let dir = TempDir::new().unwrap();
        let persistence = IndexPersistence::new(dir.path());
        let symbols = vec![Symbol::new("x", SymbolKind::Variable, "a.c", 1)];

        persistence.save_symbols(&symbols).unwrap();
        assert!(persistence.exists());

        let loaded = persistence.load_symbols().unwrap();
        assert_eq!(symbols, loaded);
    }
}
