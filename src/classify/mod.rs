//! Heuristic classifiers.
//!
//! Visibility and parameter recovery read the syntax tree; file roles and
//! entry points only look at paths, decorators and raw text. The last two sit
//! behind traits so a stricter analysis can replace the heuristics without
//! touching extraction.

pub mod entry;
pub mod params;
pub mod roles;
pub mod visibility;

pub use entry::{EntryKind, EntryPointInfo, PatternEntryPointDetector, Route, WebServiceInfo};
pub use roles::{FileRoles, FileType, HeuristicRoleClassifier};

use crate::extract::DecoratorSymbol;
use crate::profile::LanguageId;
use std::path::Path;

/// Assigns role flags to a file
pub trait RoleClassifier: Send + Sync {
    fn classify(&self, path: &Path, decorators: &[DecoratorSymbol]) -> FileRoles;
}

/// Decides whether a file starts a program
pub trait EntryPointDetector: Send + Sync {
    fn detect(&self, source: &str, language: LanguageId) -> EntryPointInfo;
}
