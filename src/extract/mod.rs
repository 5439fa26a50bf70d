//! Dispatches extraction to the language-specific extractor for a buffer
//! or file, returning zero symbols and zero references (never an error) if
//! the extension is unsupported or the parse itself fails.

mod c;
mod c_lexer;
mod script;

use crate::language::Language;
use crate::model::{Reference, Symbol};

#[derive(Debug, Default, Clone)]
pub struct ExtractOutcome {
    pub symbols: Vec<Symbol>,
    pub references: Vec<Reference>,
}

/// Extracts symbols and references from `source`, which is the content of
/// `file_path` (on disk or an unsaved editor buffer — the extractor does
/// not care which). A parser failure never raises; it yields an empty
/// outcome and the caller should log a warning.
pub fn extract(source: &str, file_path: &str) -> ExtractOutcome {
    let Some(language) = Language::from_path(std::path::Path::new(file_path)) else {
        return ExtractOutcome::default();
    };

    let result = match language {
        Language::C => c::extract(source, file_path),
        Language::Script => script::extract(source, file_path),
    };

    match result {
        Ok((symbols, references)) => ExtractOutcome { symbols, references },
        Err(err) => {
            tracing::warn!(file = file_path, error = %err, "extraction failed; treating file as empty");
            ExtractOutcome::default()
        }
    }
}
