// Import specifier resolution
//
// Specifiers are reduced to a basename and looked up among the project's
// files. Only the basename takes part in the lookup, so two `index.ts` files
// are indistinguishable.

use crate::config::AnalysisConfig;
use crate::profile::{profile_for, registry, ImportStyle, LanguageId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

/// How a specifier relates to the project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportKind {
    /// `./x`, `../x`, `.x` (Python) or a quoted C include
    Relative,
    /// Starts with a configured alias prefix such as `@/`
    Aliased,
    /// Package path in a language with qualified imports (`com.acme.Foo`)
    Qualified,
    /// Anything else: packages, the standard library, system headers
    External,
}

/// Leading segments that mark a Rust path as crate-local
const RUST_LOCAL_ROOTS: &[&str] = &["crate", "self", "super"];

pub struct ImportResolver {
    language: LanguageId,
    aliases: Vec<String>,
    resolve_qualified: bool,
    /// Every contiguous run of directory names in the project's paths,
    /// joined with `/`
    project_dirs: HashSet<String>,
    /// `module` path from `go.mod`, when the project has one
    go_module: Option<String>,
}

impl ImportResolver {
    pub fn new(language: LanguageId, config: &AnalysisConfig) -> Self {
        Self {
            language,
            aliases: config.path_aliases.clone(),
            resolve_qualified: config.resolve_qualified_imports,
            project_dirs: HashSet::new(),
            go_module: None,
        }
    }

    pub fn with_go_module(mut self, module: Option<String>) -> Self {
        self.go_module = module;
        self
    }

    /// Record the project's directory layout. Qualified specifiers are only
    /// local when their package path exists among these directories.
    pub fn with_project_paths<'a, I>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = &'a Path>,
    {
        for path in paths {
            let dirs: Vec<String> = path
                .parent()
                .map(|p| {
                    p.components()
                        .filter_map(|c| match c {
                            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
                            _ => None,
                        })
                        .collect()
                })
                .unwrap_or_default();
            for start in 0..dirs.len() {
                for end in start + 1..=dirs.len() {
                    self.project_dirs.insert(dirs[start..end].join("/"));
                }
            }
        }
        self
    }

    pub fn classify(&self, specifier: &str) -> ImportKind {
        let style = profile_for(self.language).import_style;

        if specifier.starts_with("./") || specifier.starts_with("../") {
            return ImportKind::Relative;
        }
        if style == ImportStyle::PythonModule && specifier.starts_with('.') {
            return ImportKind::Relative;
        }
        if style == ImportStyle::Include && !specifier.starts_with('<') {
            return ImportKind::Relative;
        }
        if self.aliases.iter().any(|a| specifier.starts_with(a.as_str())) {
            return ImportKind::Aliased;
        }
        if self.resolve_qualified && self.is_project_qualified(specifier) {
            return ImportKind::Qualified;
        }
        ImportKind::External
    }

    /// Candidate basenames for a specifier, most specific first. External
    /// specifiers have none.
    pub fn candidates(&self, specifier: &str, importer: &Path) -> Vec<String> {
        match self.classify(specifier) {
            ImportKind::Relative => {
                let spec = if profile_for(self.language).import_style == ImportStyle::PythonModule {
                    python_relative_path(specifier)
                } else {
                    specifier.to_string()
                };
                // `from . import x` names a package, not a file
                if spec.ends_with('/') {
                    return Vec::new();
                }
                let base = importer.parent().unwrap_or_else(|| Path::new(""));
                let joined = normalize(&base.join(spec));
                joined
                    .file_name()
                    .and_then(|n| n.to_str())
                    .map(strip_source_extension)
                    .filter(|n| !n.is_empty())
                    .into_iter()
                    .collect()
            }
            ImportKind::Aliased => {
                let alias = self
                    .aliases
                    .iter()
                    .filter(|a| specifier.starts_with(a.as_str()))
                    .max_by_key(|a| a.len())
                    .map(String::as_str)
                    .unwrap_or("");
                specifier[alias.len()..]
                    .rsplit('/')
                    .next()
                    .map(strip_source_extension)
                    .filter(|n| !n.is_empty())
                    .into_iter()
                    .collect()
            }
            ImportKind::Qualified => {
                let segments = self.segments(specifier);
                let mut names: Vec<String> = segments.last().map(|s| s.to_string()).into_iter().collect();
                // `use crate::config::Config` names an item inside `config.rs`
                if self.language == LanguageId::Rust && segments.len() > 1 {
                    names.push(segments[segments.len() - 2].to_string());
                }
                names
            }
            ImportKind::External => Vec::new(),
        }
    }

    /// Whether a dotted, `::` or `/` path points into the project
    fn is_project_qualified(&self, specifier: &str) -> bool {
        let Some(sep) = self.qualified_separator() else {
            return false;
        };
        if !specifier.contains(sep) {
            return false;
        }

        if self.language == LanguageId::Rust {
            let first = specifier.split(sep).next().unwrap_or("").trim();
            return RUST_LOCAL_ROOTS.contains(&first);
        }

        let segments = self.segments(specifier);
        if segments.len() < 2 {
            return false;
        }
        let package = &segments[..segments.len() - 1];
        if self.language == LanguageId::Go {
            return self.is_go_project_path(specifier, &segments);
        }
        self.project_dirs.contains(&package.join("/"))
    }

    /// Go imports name package directories. With a known module path only
    /// paths under it are local. Without one, standard library paths (no dot
    /// in the first segment) are external and a module path is local when a
    /// tail of it names a project directory.
    fn is_go_project_path(&self, specifier: &str, segments: &[&str]) -> bool {
        if let Some(module) = &self.go_module {
            return specifier
                .strip_prefix(module.as_str())
                .is_some_and(|rest| rest.starts_with('/'));
        }
        if !segments[0].contains('.') {
            return false;
        }
        (1..segments.len()).any(|start| self.project_dirs.contains(&segments[start..].join("/")))
    }

    /// Path segments with braces, globs and Rust path keywords removed
    fn segments<'s>(&self, specifier: &'s str) -> Vec<&'s str> {
        let sep = self.qualified_separator().unwrap_or(".");
        let trimmed = specifier.split('{').next().unwrap_or(specifier);
        trimmed
            .split(sep)
            .map(str::trim)
            .filter(|s| !s.is_empty() && *s != "*" && !RUST_LOCAL_ROOTS.contains(s))
            .collect()
    }

    fn qualified_separator(&self) -> Option<&'static str> {
        match self.language {
            LanguageId::Python | LanguageId::Java | LanguageId::CSharp => Some("."),
            LanguageId::Rust => Some("::"),
            LanguageId::Go => Some("/"),
            _ => None,
        }
    }
}

/// `module` directive of a `go.mod` file
pub fn go_module_path(go_mod: &str) -> Option<String> {
    go_mod
        .lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix("module "))
        .map(|m| m.trim().trim_matches('"').to_string())
        .filter(|m| !m.is_empty())
}

/// `.models` -> `./models`, `..core.db` -> `../core/db`
fn python_relative_path(specifier: &str) -> String {
    let dots = specifier.chars().take_while(|c| *c == '.').count();
    let rest = specifier[dots..].replace('.', "/");
    let prefix = if dots <= 1 {
        "./".to_string()
    } else {
        "../".repeat(dots - 1)
    };
    format!("{}{}", prefix, rest)
}

/// Strip a trailing registered source extension (`./api.ts` -> `api`), but
/// keep dotted names like `user.service`
pub fn strip_source_extension(name: &str) -> String {
    if let Some((stem, ext)) = name.rsplit_once('.') {
        let known = registry().iter().any(|p| p.handles_extension(ext));
        if known && !stem.is_empty() {
            return stem.to_string();
        }
    }
    name.to_string()
}

/// Lexical normalization: drops `.` and folds `..` without touching disk
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
