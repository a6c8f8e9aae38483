// Source file discovery
//
// Walks the project root, keeps files with a registered source extension and
// applies include/exclude globs relative to the root.

use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::profile::language_for_path;
use glob::{MatchOptions, Pattern};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// Directories never descended into
pub const DEFAULT_EXCLUDES: &[&str] = &[
    "node_modules",
    ".git",
    "dist",
    "build",
    "target",
    "vendor",
    "__pycache__",
    "venv",
    ".venv",
    "coverage",
];

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

pub struct FileDiscovery {
    include: Vec<Pattern>,
    exclude: Vec<Pattern>,
}

impl FileDiscovery {
    pub fn new(include: &[String], exclude: &[String]) -> Result<Self> {
        Ok(Self {
            include: compile(include)?,
            exclude: compile(exclude)?,
        })
    }

    pub fn from_config(config: &AnalysisConfig) -> Result<Self> {
        Self::new(&config.include, &config.exclude)
    }

    /// Absolute paths of every candidate source file, sorted
    pub fn discover(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        let walker = WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_default_excluded(e));

        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if language_for_path(path).is_none() {
                continue;
            }

            let relative = path.strip_prefix(root).unwrap_or(path);
            if !self.accepts(relative) {
                debug!(path = %relative.display(), "excluded by pattern");
                continue;
            }
            files.push(path.to_path_buf());
        }

        files.sort();
        Ok(files)
    }

    /// Does a root-relative path pass the include and exclude globs?
    pub fn accepts(&self, relative: &Path) -> bool {
        let included = self
            .include
            .iter()
            .any(|p| p.matches_path_with(relative, MATCH_OPTIONS));
        let excluded = self
            .exclude
            .iter()
            .any(|p| p.matches_path_with(relative, MATCH_OPTIONS));
        included && !excluded
    }
}

fn compile(patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| Pattern::new(p).map_err(Into::into))
        .collect()
}

fn is_default_excluded(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| DEFAULT_EXCLUDES.contains(&name))
}
