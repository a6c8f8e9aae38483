// Analysis pipeline: discover, parse, extract, then build the project model

pub mod discovery;
pub mod features;
pub mod imports;
pub mod project;

pub use discovery::{FileDiscovery, DEFAULT_EXCLUDES};
pub use features::{feature_name, group_features, Feature, ROOT_FEATURE};
pub use imports::{ImportKind, ImportResolver};
pub use project::{DependencyNode, ProjectModel, ProjectModelBuilder, ProjectStats};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::extract::{SymbolExtractor, SymbolIndex};
use crate::parser::{grammar_for, Grammar};
use crate::profile::{detect_language, language_for_path, profile_for, LanguageId};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A file that could not be read or parsed
#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of analyzing a codebase
#[derive(Debug)]
pub struct AnalysisResult {
    pub root: PathBuf,
    pub language: LanguageId,
    pub model: ProjectModel,
    /// Files that yielded an empty index because reading or parsing failed
    pub failures: Vec<FileFailure>,
    /// Files over the size limit, never read
    pub skipped: Vec<PathBuf>,
}

/// Languages analysed alongside the run language
fn companions(language: LanguageId) -> &'static [LanguageId] {
    match language {
        LanguageId::TypeScript => &[LanguageId::JavaScript],
        LanguageId::Cpp => &[LanguageId::C],
        _ => &[],
    }
}

/// Main analyzer that orchestrates the pipeline
pub struct Analyzer {
    config: Config,
    verbose: bool,
}

impl Analyzer {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            verbose: false,
        })
    }

    /// Show a progress bar while files are processed
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Analyze the codebase at `root`
    pub fn analyze(&self, root: &Path) -> Result<AnalysisResult> {
        if !root.exists() {
            return Err(Error::PathNotFound(root.to_path_buf()));
        }
        let root = root.canonicalize()?;

        let discovered = FileDiscovery::from_config(&self.config.analysis)?.discover(&root)?;
        let language = self
            .config
            .forced_language()
            .unwrap_or_else(|| detect_language(discovered.iter().map(PathBuf::as_path)));

        let files: Vec<PathBuf> = discovered
            .into_iter()
            .filter(|p| {
                language_for_path(p).is_some_and(|l| l == language || companions(language).contains(&l))
            })
            .collect();
        if files.is_empty() {
            return Err(Error::NoSourceFiles(root));
        }

        let grammars = load_grammars(language)?;
        info!(language = %language, files = files.len(), "analyzing");

        let progress = self.progress_bar(files.len());
        let mut indexes = Vec::with_capacity(files.len());
        let mut failures = Vec::new();
        let mut skipped = Vec::new();

        for path in &files {
            let relative = path.strip_prefix(&root).unwrap_or(path).to_path_buf();
            if let Some(pb) = &progress {
                pb.set_message(relative.display().to_string());
                pb.inc(1);
            }

            let file_language = language_for_path(path).unwrap_or(language);
            let grammar = match grammars.get(&file_language) {
                Some(g) => g.as_ref(),
                None => continue,
            };

            match self.process_file(path, &relative, grammar) {
                Ok(Some(index)) => indexes.push(index),
                Ok(None) => skipped.push(relative),
                Err(e) => {
                    warn!(path = %relative.display(), error = %e, "file yielded no symbols");
                    failures.push(FileFailure {
                        path: relative.clone(),
                        reason: e.to_string(),
                    });
                    indexes.push(SymbolIndex::empty(relative, file_language));
                }
            }
        }

        if let Some(pb) = progress {
            pb.finish_with_message("extraction complete");
        }

        let go_module = if language == LanguageId::Go {
            fs::read_to_string(root.join("go.mod"))
                .ok()
                .and_then(|contents| imports::go_module_path(&contents))
        } else {
            None
        };
        let model = ProjectModelBuilder::new(language, &self.config.analysis)
            .with_go_module(go_module)
            .build(indexes);
        debug!(edges = model.edge_count(), features = model.features.len(), "model built");

        Ok(AnalysisResult {
            root,
            language,
            model,
            failures,
            skipped,
        })
    }

    /// Read, parse and extract one file. `Ok(None)` means it was too large.
    fn process_file(&self, path: &Path, relative: &Path, grammar: &dyn Grammar) -> Result<Option<SymbolIndex>> {
        let size = fs::metadata(path)?.len();
        if size > self.config.analysis.max_file_size {
            warn!(
                path = %relative.display(),
                size,
                limit = self.config.analysis.max_file_size,
                "skipping oversized file"
            );
            return Ok(None);
        }

        let source = fs::read_to_string(path)?;
        let tree = grammar
            .parse_path(path, &source)
            .map_err(|e| match e {
                Error::Parse { message, .. } => Error::parse(relative, message),
                other => other,
            })?;

        let extractor = SymbolExtractor::new(profile_for(grammar.language()));
        Ok(Some(extractor.extract(relative, &tree)))
    }

    fn progress_bar(&self, len: usize) -> Option<ProgressBar> {
        if !self.verbose {
            return None;
        }
        let pb = ProgressBar::new(len as u64);
        if let Ok(style) = ProgressStyle::default_bar().template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}") {
            pb.set_style(style.progress_chars("#>-"));
        }
        Some(pb)
    }
}

/// Grammars for the run language and its companions. Only a missing grammar
/// for the run language itself is fatal.
fn load_grammars(language: LanguageId) -> Result<HashMap<LanguageId, Box<dyn Grammar>>> {
    let mut grammars = HashMap::new();
    let primary = grammar_for(language).ok_or_else(|| Error::no_grammar(language.as_str()))?;
    grammars.insert(language, primary);
    for companion in companions(language) {
        if let Some(g) = grammar_for(*companion) {
            grammars.insert(*companion, g);
        }
    }
    Ok(grammars)
}
