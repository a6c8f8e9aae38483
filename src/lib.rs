//! codeatlas - cross-language symbol extraction
//!
//! Parses a source tree with tree-sitter, extracts classes, interfaces,
//! functions, imports and decorators through per-language node-type tables,
//! classifies each file and builds a project model with a dependency graph
//! and feature groups.

pub mod analysis;
pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod logging;
pub mod output;
pub mod parser;
pub mod profile;

// Re-export main types
pub use analysis::{AnalysisResult, Analyzer, ProjectModel, ProjectModelBuilder};
pub use config::Config;
pub use error::{Error, Result};
pub use extract::{SymbolExtractor, SymbolIndex};
pub use profile::{profile_for, LanguageId, LanguageProfile};
