//! The data model shared by every stage of the pipeline: extractor output,
//! repository index entries, and checker input are all built from these
//! three types.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolKind {
    Variable,
    Function,
    Array,
    Class,
    Struct,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub type_: Option<String>,
    pub has_default: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    pub type_: Option<String>,
}

/// A declaration or definition found by the extractor, either in the
/// unsaved buffer or as part of a workspace scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub type_: Option<String>,
    pub file_path: String,
    pub line: u32,
    /// Enclosing function/class name, or empty string at module/file scope.
    pub scope: String,
    pub array_size: Option<i64>,
    pub params: Vec<Param>,
    pub return_type: Option<String>,
    pub is_variadic: bool,
    pub is_extern: bool,
    pub members: Vec<Member>,
}

impl Symbol {
    pub fn new(name: impl Into<String>, kind: SymbolKind, file_path: impl Into<String>, line: u32) -> Self {
        Self {
            name: name.into(),
            kind,
            type_: None,
            file_path: file_path.into(),
            line,
            scope: String::new(),
            array_size: None,
            params: Vec::new(),
            return_type: None,
            is_variadic: false,
            is_extern: false,
            members: Vec::new(),
        }
    }
}

/// A use of a symbol, tagged by kind. Each variant carries only the fields
/// that kind's checkers actually read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reference {
    Call {
        name: String,
        line: u32,
        arg_count: usize,
        arg_types: Vec<Option<String>>,
    },
    FormatCall {
        name: String,
        line: u32,
        format_specifiers: usize,
        arg_count: usize,
    },
    ArrayAccess {
        name: String,
        line: u32,
        index_value: Option<i64>,
    },
    ArrayWrite {
        name: String,
        line: u32,
        inferred_type: Option<String>,
        rhs_name: Option<String>,
    },
    Import {
        line: u32,
        imported_names: Vec<String>,
        module_name: Option<String>,
        is_wildcard: bool,
    },
    ReturnValue {
        line: u32,
        func_name: Option<String>,
        declared_return_type: Option<String>,
        return_value_type: Option<String>,
    },
    Assignment {
        name: String,
        line: u32,
        annotation_type: Option<String>,
        inferred_type: Option<String>,
    },
    MemberAccess {
        line: u32,
        object: String,
        member_name: String,
    },
    Read {
        name: String,
        line: u32,
    },
}

impl Reference {
    pub fn line(&self) -> u32 {
        match self {
            Reference::Call { line, .. }
            | Reference::FormatCall { line, .. }
            | Reference::ArrayAccess { line, .. }
            | Reference::ArrayWrite { line, .. }
            | Reference::Import { line, .. }
            | Reference::ReturnValue { line, .. }
            | Reference::Assignment { line, .. }
            | Reference::MemberAccess { line, .. }
            | Reference::Read { line, .. } => *line,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub file: String,
    pub line: u32,
    pub severity: Severity,
    pub code: String,
    pub message: String,
}

impl Diagnostic {
    pub fn new(
        file: impl Into<String>,
        line: u32,
        severity: Severity,
        code: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            line,
            severity,
            code: code.to_string(),
            message: message.into(),
        }
    }

    /// The identity `deduplicate` collapses on: first occurrence wins.
    fn dedup_key(&self) -> (String, u32, String, String) {
        (self.file.clone(), self.line, self.code.clone(), self.message.clone())
    }
}

/// Collapse diagnostics sharing `(file, line, code, message)`, keeping the
/// first occurrence and its position in the input order.
pub fn deduplicate(diagnostics: Vec<Diagnostic>) -> Vec<Diagnostic> {
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::with_capacity(diagnostics.len());
    for d in diagnostics {
        if seen.insert(d.dedup_key()) {
            out.push(d);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedup_keeps_first_occurrence_order() {
        let a = Diagnostic::new("a.c", 1, Severity::Error, "SNIPE_TYPE_MISMATCH", "x");
        let b = Diagnostic::new("a.c", 1, Severity::Error, "SNIPE_TYPE_MISMATCH", "x");
        let c = Diagnostic::new("a.c", 2, Severity::Warning, "SNIPE_UNDEFINED_SYMBOL", "y");
        let out = deduplicate(vec![a.clone(), c.clone(), b]);
        assert_eq!(out, vec![a, c]);
    }
}
