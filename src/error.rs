//! Structured error types using thiserror.
//!
//! `ExtractError` never crosses the public API: a file that fails to parse
//! contributes zero symbols and zero references, logged at `warn`. Only
//! `EngineError` is returned from `analyze`/`refresh`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("failed to initialize {language} parser")]
    ParserInit { language: &'static str },

    #[error("source is not valid UTF-8")]
    InvalidUtf8,

    #[error("tree-sitter produced no parse tree for '{path}'")]
    NoParseTree { path: PathBuf },
}

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("failed to read file '{path}': {source}")]
    FileRead { path: PathBuf, source: std::io::Error },

    #[error("failed to write file '{path}': {source}")]
    FileWrite { path: PathBuf, source: std::io::Error },

    #[error("failed to serialize repository index: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("workspace root '{path}' does not exist or is not a directory")]
    InvalidRoot { path: PathBuf },
}

impl IndexError {
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            Self::FileRead { .. } | Self::FileWrite { .. } => vec![
                "check file permissions under the workspace root",
                "ensure the index directory is not on a read-only filesystem",
            ],
            Self::Serialize(_) => vec!["run refresh() again to rebuild a fresh snapshot"],
            Self::InvalidRoot { .. } => vec!["pass an existing directory as the workspace root"],
        }
    }
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Index(#[from] IndexError),

    #[error("no workspace root has been configured; call refresh() first")]
    NoWorkspace,
}

pub type ExtractResult<T> = Result<T, ExtractError>;
pub type IndexResult<T> = Result<T, IndexError>;
pub type EngineResult<T> = Result<T, EngineError>;
