// Language-neutral symbol records
//
// Everything the extractors produce for one file. Records are plain data and
// are never mutated once the file's SymbolIndex is complete.

use crate::classify::{EntryPointInfo, FileRoles, FileType};
use crate::profile::LanguageId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Placeholder for a parameter or property whose type was not written down
pub const UNKNOWN_TYPE: &str = "unknown";

/// Placeholder for a function without a declared return type
pub const NO_RETURN: &str = "none";

/// Name given to functions that have neither a declared nor an assigned name
pub const ANONYMOUS: &str = "anonymous";

/// Member visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Private,
    Protected,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
            Visibility::Protected => "protected",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A function or method parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }

    pub fn untyped(name: impl Into<String>) -> Self {
        Self::new(name, UNKNOWN_TYPE)
    }

    pub fn has_type(&self) -> bool {
        self.type_name != UNKNOWN_TYPE
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_type() {
            write!(f, "{}: {}", self.name, self.type_name)
        } else {
            write!(f, "{}", self.name)
        }
    }
}

/// Render `name(a: T, b) -> R`, leaving out unknown types and `none` returns
pub fn render_signature(name: &str, parameters: &[Parameter], return_type: &str, is_async: bool) -> String {
    let params: Vec<String> = parameters.iter().map(|p| p.to_string()).collect();
    let mut sig = String::new();
    if is_async {
        sig.push_str("async ");
    }
    sig.push_str(name);
    sig.push('(');
    sig.push_str(&params.join(", "));
    sig.push(')');
    if return_type != NO_RETURN {
        sig.push_str(" -> ");
        sig.push_str(return_type);
    }
    sig
}

/// A method, constructor or interface method signature
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodSymbol {
    pub name: String,
    pub visibility: Visibility,
    pub parameters: Vec<Parameter>,
    pub return_type: String,
    pub signature: String,
    pub is_static: bool,
    pub is_async: bool,
    pub line_start: usize,
    pub line_end: usize,
}

/// A class field or attribute
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertySymbol {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub visibility: Visibility,
    pub is_static: bool,
    pub line: usize,
}

/// A class, struct or record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassSymbol {
    pub name: String,
    pub methods: Vec<MethodSymbol>,
    pub properties: Vec<PropertySymbol>,
    pub constructor: Option<MethodSymbol>,
    pub extends: Option<String>,
    pub implements: Vec<String>,
    pub line_start: usize,
    pub line_end: usize,
}

impl ClassSymbol {
    pub fn new(name: impl Into<String>, line_start: usize) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
            properties: Vec::new(),
            constructor: None,
            extends: None,
            implements: Vec::new(),
            line_start,
            line_end: line_start,
        }
    }

    pub fn method(&self, name: &str) -> Option<&MethodSymbol> {
        self.methods.iter().find(|m| m.name == name)
    }

    pub fn property(&self, name: &str) -> Option<&PropertySymbol> {
        self.properties.iter().find(|p| p.name == name)
    }
}

/// A standalone function, closure or lambda
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionSymbol {
    pub name: String,
    pub visibility: Visibility,
    pub parameters: Vec<Parameter>,
    pub return_type: String,
    pub signature: String,
    pub is_static: bool,
    pub is_async: bool,
    pub is_anonymous: bool,
    pub is_exported: bool,
    pub is_default: bool,
    pub description: String,
    pub line_start: usize,
    pub line_end: usize,
}

/// A property declared by an interface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceProperty {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub optional: bool,
}

/// An interface, trait or protocol declaration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterfaceSymbol {
    pub name: String,
    pub properties: Vec<InterfaceProperty>,
    pub methods: Vec<MethodSymbol>,
    pub extends: Vec<String>,
    pub type_parameters: Vec<String>,
    pub line_start: usize,
    pub line_end: usize,
}

/// An import as written in the source, unresolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportEdge {
    pub specifier: String,
    pub line: usize,
}

/// A decorator or annotation with its literal arguments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoratorSymbol {
    #[serde(rename = "type")]
    pub name: String,
    pub properties: BTreeMap<String, String>,
    pub line: usize,
}

/// Everything extracted from one file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolIndex {
    pub path: PathBuf,
    pub language: LanguageId,
    pub classes: Vec<ClassSymbol>,
    pub interfaces: Vec<InterfaceSymbol>,
    pub functions: Vec<FunctionSymbol>,
    pub imports: Vec<ImportEdge>,
    pub decorators: Vec<DecoratorSymbol>,
    pub roles: FileRoles,
    pub entry: EntryPointInfo,
    pub line_count: usize,
}

impl SymbolIndex {
    /// An index with no symbols, used for files that failed to read or parse
    pub fn empty(path: impl Into<PathBuf>, language: LanguageId) -> Self {
        Self {
            path: path.into(),
            language,
            classes: Vec::new(),
            interfaces: Vec::new(),
            functions: Vec::new(),
            imports: Vec::new(),
            decorators: Vec::new(),
            roles: FileRoles::default(),
            entry: EntryPointInfo::default(),
            line_count: 0,
        }
    }

    /// File stem used as the lookup key (`src/app/Widget.tsx` -> `Widget`)
    pub fn basename(&self) -> String {
        basename_of(&self.path)
    }

    pub fn primary_type(&self) -> FileType {
        self.roles.primary_type()
    }

    pub fn symbol_count(&self) -> usize {
        self.classes.len() + self.interfaces.len() + self.functions.len()
    }

    pub fn class(&self, name: &str) -> Option<&ClassSymbol> {
        self.classes.iter().find(|c| c.name == name)
    }

    pub fn function(&self, name: &str) -> Option<&FunctionSymbol> {
        self.functions.iter().find(|f| f.name == name)
    }

    pub fn interface(&self, name: &str) -> Option<&InterfaceSymbol> {
        self.interfaces.iter().find(|i| i.name == name)
    }

    pub fn has_decorator(&self, name: &str) -> bool {
        self.decorators.iter().any(|d| d.name == name)
    }
}

/// File stem of a path as an owned string
pub fn basename_of(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
