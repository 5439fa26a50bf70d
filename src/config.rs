//! Layered configuration: defaults, then a TOML file, then `SNIPE_`-prefixed
//! environment variables.
//!
//! # Environment variables
//!
//! Double underscores separate nested levels:
//! - `SNIPE_INDEX_PATH=.cache/snipe` overrides `index_path`
//! - `SNIPE_LOGGING__DEFAULT=debug` overrides `logging.default`

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::language::Language;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    /// Where persisted state (`repo_symbols.json`, `diagnostics.json`) lives,
    /// relative to the workspace root.
    #[serde(default = "default_index_path")]
    pub index_path: PathBuf,

    /// Ignore patterns layered on top of the scanner's fixed ignore-set.
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Gates the workspace scan and `analyze` dispatch per language; see
    /// `LanguagesConfig::enabled`.
    #[serde(default)]
    pub languages: LanguagesConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LanguagesConfig {
    #[serde(default = "default_true")]
    pub c: bool,
    #[serde(default = "default_true")]
    pub script: bool,
}

impl Default for LanguagesConfig {
    fn default() -> Self {
        Self { c: true, script: true }
    }
}

impl LanguagesConfig {
    /// Whether `refresh`/`analyze` should consider a file of this language
    /// at all. A disabled language is treated exactly like an unsupported
    /// extension: skipped during the workspace scan, and an `analyze` call
    /// against it returns no diagnostics.
    pub fn enabled(&self, language: Language) -> bool {
        match language {
            Language::C => self.c,
            Language::Script => self.script,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub default: String,
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default: default_log_level(),
            modules: HashMap::new(),
        }
    }
}

fn default_index_path() -> PathBuf {
    PathBuf::from(".snipe")
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            index_path: default_index_path(),
            ignore: Vec::new(),
            languages: LanguagesConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Settings {
    /// Load layered configuration, looking for `snipe.toml` at the
    /// workspace root.
    pub fn load(workspace_root: &std::path::Path) -> Result<Self, figment::Error> {
        let config_path = workspace_root.join("snipe.toml");
        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::file(config_path))
            .merge(
                Env::prefixed("SNIPE_").map(|key| key.as_str().to_lowercase().replace("__", ".").into()),
            )
            .extract()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_are_permissive() {
        let settings = Settings::default();
        assert_eq!(settings.index_path, PathBuf::from(".snipe"));
        assert!(settings.languages.c);
        assert!(settings.languages.script);
        assert_eq!(settings.logging.default, "warn");
    }

    #[test]
    fn toml_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("snipe.toml"),
            "index_path = \".cache\"\n[languages]\nc = false\n",
        )
        .unwrap();

        let settings = Settings::load(dir.path()).unwrap();
        assert_eq!(settings.index_path, PathBuf::from(".cache"));
        assert!(!settings.languages.c);
        assert!(settings.languages.script);
    }
}
