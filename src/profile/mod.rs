//! Grammar node-type registry.
//!
//! One static [`LanguageProfile`] per language maps abstract constructs
//! ("class declaration", "decorator", ...) to the concrete node kinds emitted
//! by that language's grammar. Extractors are written once against
//! [`Construct`] and never mention a grammar's node names directly.
//!
//! Missing mappings are empty slices and mean "not applicable".

mod tables;

use crate::extract::Visibility;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// Languages known to the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageId {
    JavaScript,
    TypeScript,
    Python,
    Java,
    Go,
    Rust,
    C,
    Cpp,
    CSharp,
    Ruby,
    Unknown,
}

impl LanguageId {
    /// Parse a language name or common alias, case-insensitively
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "javascript" | "js" | "jsx" | "node" => LanguageId::JavaScript,
            "typescript" | "ts" | "tsx" => LanguageId::TypeScript,
            "python" | "py" => LanguageId::Python,
            "java" => LanguageId::Java,
            "go" | "golang" => LanguageId::Go,
            "rust" | "rs" => LanguageId::Rust,
            "c" => LanguageId::C,
            "cpp" | "c++" | "cxx" => LanguageId::Cpp,
            "csharp" | "c#" | "cs" => LanguageId::CSharp,
            "ruby" | "rb" => LanguageId::Ruby,
            _ => LanguageId::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LanguageId::JavaScript => "javascript",
            LanguageId::TypeScript => "typescript",
            LanguageId::Python => "python",
            LanguageId::Java => "java",
            LanguageId::Go => "go",
            LanguageId::Rust => "rust",
            LanguageId::C => "c",
            LanguageId::Cpp => "cpp",
            LanguageId::CSharp => "csharp",
            LanguageId::Ruby => "ruby",
            LanguageId::Unknown => "unknown",
        }
    }
}

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Abstract syntactic constructs the extractors look for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Construct {
    ClassDeclaration,
    ClassBody,
    Method,
    Field,
    /// Dedicated constructor nodes (Java, C#); name-based constructors are
    /// recognised separately
    Constructor,
    Interface,
    InterfaceBody,
    PropertySignature,
    MethodSignature,
    InterfaceExtends,
    TypeParameters,
    Function,
    Import,
    Decorator,
    Superclass,
    Implements,
    Parameters,
    TypeAnnotation,
    /// Modifier containers (`modifiers`, `accessibility_modifier`) and bare
    /// modifier tokens (`static`, `async`)
    Modifier,
    /// Label-style visibility sections (`public:` in C++)
    AccessSection,
    ExportWrapper,
    /// Nodes that lend their name to an anonymous value
    Assignment,
    /// Transparent wrappers skipped when locating a member's parent
    Wrapper,
    Identifier,
    Comment,
    StringLiteral,
    ObjectLiteral,
    Pair,
    Call,
}

/// How a language expresses member visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityStyle {
    /// Leading `_` (or `#`) marks private names
    Underscore,
    /// Upper-case first letter marks exported names
    Capitalization,
    /// Explicit keywords, with a default when none is present
    Modifiers { default: Visibility },
}

/// Where a parameter's type sits relative to its name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypePosition {
    /// `name: Type`, `name Type`
    AfterName,
    /// `Type name`
    BeforeName,
}

/// How an import statement spells its module specifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportStyle {
    /// A quoted source string (`import x from "./y"`)
    StringLiteral,
    /// Dotted module paths, leading dots for relative (`from .y import x`)
    PythonModule,
    /// Package-qualified paths (`import com.acme.Y;`, `use crate::y;`)
    QualifiedPath,
    /// Preprocessor includes (`#include "y.h"`)
    Include,
    None,
}

/// Per-language dispatch table
#[derive(Debug)]
pub struct LanguageProfile {
    pub id: LanguageId,
    pub extensions: &'static [&'static str],
    pub visibility: VisibilityStyle,
    pub type_position: TypePosition,
    /// Grammar fields holding a function's return type, tried in order
    pub return_type_fields: &'static [&'static str],
    pub import_style: ImportStyle,
    pub node_kinds: &'static [(Construct, &'static [&'static str])],
}

impl LanguageProfile {
    /// Concrete node kinds for a construct, empty when not applicable
    pub fn kinds(&self, construct: Construct) -> &'static [&'static str] {
        self.node_kinds
            .iter()
            .find(|(c, _)| *c == construct)
            .map(|(_, kinds)| *kinds)
            .unwrap_or(&[])
    }

    /// Does this node kind realise the construct?
    pub fn is(&self, construct: Construct, kind: &str) -> bool {
        self.kinds(construct).contains(&kind)
    }

    pub fn supports(&self, construct: Construct) -> bool {
        !self.kinds(construct).is_empty()
    }

    pub fn handles_extension(&self, ext: &str) -> bool {
        let ext = ext.to_lowercase();
        self.extensions.iter().any(|e| *e == ext)
    }

    pub fn handles_path(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| self.handles_extension(e))
    }
}

/// Profile for a language; unknown languages get the default table
pub fn profile_for(id: LanguageId) -> &'static LanguageProfile {
    tables::REGISTRY
        .iter()
        .copied()
        .find(|p| p.id == id)
        .unwrap_or(&tables::DEFAULT)
}

/// All registered profiles, in detection tie-break order
pub fn registry() -> &'static [&'static LanguageProfile] {
    tables::REGISTRY
}

/// Language owning a file extension
pub fn language_for_path(path: &Path) -> Option<LanguageId> {
    tables::REGISTRY
        .iter()
        .find(|p| p.handles_path(path))
        .map(|p| p.id)
}

/// Pick the language with the most files. Ties go to registry order.
pub fn detect_language<'a, I>(paths: I) -> LanguageId
where
    I: IntoIterator<Item = &'a Path>,
{
    let mut counts: HashMap<LanguageId, usize> = HashMap::new();
    for path in paths {
        if let Some(id) = language_for_path(path) {
            *counts.entry(id).or_default() += 1;
        }
    }

    let mut best = LanguageId::Unknown;
    let mut best_count = 0;
    for profile in tables::REGISTRY {
        let count = counts.get(&profile.id).copied().unwrap_or(0);
        if count > best_count {
            best = profile.id;
            best_count = count;
        }
    }
    best
}
