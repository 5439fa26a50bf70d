//! Repository-aware static analysis for C/header buffers and a dynamically
//! typed scripting language with optional type annotations.
//!
//! [`AnalysisEngine`] is the entry point: `refresh` indexes a workspace
//! once, `analyze` runs the checker catalog against an unsaved buffer
//! using that index.

pub mod config;
pub mod engine;
pub mod error;
pub mod extract;
pub mod index;
pub mod language;
pub mod logging;
pub mod model;
pub mod rules;

pub use config::Settings;
pub use engine::AnalysisEngine;
pub use error::{EngineError, EngineResult, ExtractError, IndexError};
pub use language::Language;
pub use model::{Diagnostic, Member, Param, Reference, Severity, Symbol, SymbolKind};
