//! Language dispatch. Two languages are understood: a curly-brace systems
//! language (`.c`, `.h`) and a dynamically typed scripting language with
//! optional type annotations (`.py`).

use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    C,
    Script,
}

impl Language {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("c") | Some("h") => Some(Language::C),
            Some("py") => Some(Language::Script),
            _ => None,
        }
    }

    pub fn is_supported_extension(ext: &str) -> bool {
        matches!(ext, "c" | "h" | "py")
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::C => "c",
            Language::Script => "script",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn dispatches_by_extension() {
        assert_eq!(Language::from_path(&PathBuf::from("foo.c")), Some(Language::C));
        assert_eq!(Language::from_path(&PathBuf::from("foo.h")), Some(Language::C));
        assert_eq!(Language::from_path(&PathBuf::from("foo.py")), Some(Language::Script));
        assert_eq!(Language::from_path(&PathBuf::from("foo.rs")), None);
    }
}
