// Output generation: analysis.json, ARCHITECTURE.md and Mermaid diagrams

pub mod diagrams;
pub mod templates;

pub use diagrams::DiagramGenerator;
pub use templates::{Diagrams, TemplateEngine};

use crate::analysis::{AnalysisResult, DependencyNode, Feature, FileFailure, ProjectStats};
use crate::config::{Config, ProjectConfig};
use crate::error::Result;
use crate::extract::SymbolIndex;
use crate::profile::LanguageId;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const JSON_FILE: &str = "analysis.json";
pub const MARKDOWN_FILE: &str = "ARCHITECTURE.md";
pub const DEPENDENCY_DIAGRAM_FILE: &str = "dependencies.mmd";
pub const CLASS_DIAGRAM_FILE: &str = "classes.mmd";

/// Shape of analysis.json
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub project: &'a str,
    pub language: LanguageId,
    pub stats: ProjectStats,
    pub files: &'a [SymbolIndex],
    pub lookup: &'a BTreeMap<String, PathBuf>,
    pub dependency_graph: &'a BTreeMap<String, DependencyNode>,
    pub features: &'a BTreeMap<String, Feature>,
    pub cycles: Vec<Vec<PathBuf>>,
    pub failures: &'a [FileFailure],
    pub skipped: &'a [PathBuf],
}

impl<'a> JsonReport<'a> {
    pub fn new(analysis: &'a AnalysisResult, project: &'a str) -> Self {
        let model = &analysis.model;
        Self {
            project,
            language: analysis.language,
            stats: model.stats(),
            files: &model.files,
            lookup: &model.lookup,
            dependency_graph: &model.dependency_graph,
            features: &model.features,
            cycles: model.cycles(),
            failures: &analysis.failures,
            skipped: &analysis.skipped,
        }
    }
}

/// What was written
#[derive(Debug, Default)]
pub struct GenerationReport {
    pub files_written: Vec<PathBuf>,
}

/// Writes every requested artifact into the output directory
pub struct OutputWriter<'a> {
    config: &'a Config,
}

impl<'a> OutputWriter<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    pub fn write(&self, analysis: &AnalysisResult) -> Result<GenerationReport> {
        let dir = &self.config.output.directory;
        fs::create_dir_all(dir)?;

        let project = self.project_name(analysis);
        let format = self.config.output.format;
        let mut report = GenerationReport::default();

        let diagrams = if self.config.diagrams.enabled {
            let generator = DiagramGenerator::from_config(&self.config.diagrams);
            Some(Diagrams {
                dependencies: generator.dependency_graph(&analysis.model),
                classes: generator.class_diagram(&analysis.model),
            })
        } else {
            None
        };

        if format.wants_json() {
            let json = serde_json::to_string_pretty(&JsonReport::new(analysis, &project))?;
            report.files_written.push(write_file(dir, JSON_FILE, &json)?);
        }

        if format.wants_markdown() {
            let markdown = TemplateEngine::new()?.render_architecture(analysis, &project, diagrams.as_ref())?;
            report.files_written.push(write_file(dir, MARKDOWN_FILE, &markdown)?);
        }

        if let Some(diagrams) = &diagrams {
            report
                .files_written
                .push(write_file(dir, DEPENDENCY_DIAGRAM_FILE, &diagrams.dependencies)?);
            if let Some(classes) = &diagrams.classes {
                report.files_written.push(write_file(dir, CLASS_DIAGRAM_FILE, classes)?);
            }
        }

        info!(dir = %dir.display(), files = report.files_written.len(), "output written");
        Ok(report)
    }

    /// Configured name, or the root directory's name when left at the default
    fn project_name(&self, analysis: &AnalysisResult) -> String {
        let configured = &self.config.project.name;
        if configured != &ProjectConfig::default().name {
            return configured.clone();
        }
        analysis
            .root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| configured.clone())
    }
}

fn write_file(dir: &Path, name: &str, contents: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, contents)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::ProjectModelBuilder;
    use crate::config::OutputFormat;
    use crate::extract::ClassSymbol;
    use tempfile::TempDir;

    fn analysis() -> AnalysisResult {
        let mut index = SymbolIndex::empty("src/app.py", LanguageId::Python);
        index.classes.push(ClassSymbol::new("App", 1));
        let model = ProjectModelBuilder::new(LanguageId::Python, &Default::default()).build(vec![index]);
        AnalysisResult {
            root: PathBuf::from("/work/shop"),
            language: LanguageId::Python,
            model,
            failures: vec![],
            skipped: vec![],
        }
    }

    fn config(dir: &Path, format: OutputFormat, diagrams: bool) -> Config {
        let mut config = Config::default();
        config.output.directory = dir.to_path_buf();
        config.output.format = format;
        config.diagrams.enabled = diagrams;
        config
    }

    #[test]
    fn test_writes_everything() {
        let dir = TempDir::new().unwrap();
        let config = config(dir.path(), OutputFormat::Both, true);
        let report = OutputWriter::new(&config).write(&analysis()).unwrap();

        assert_eq!(report.files_written.len(), 4);
        for name in [JSON_FILE, MARKDOWN_FILE, DEPENDENCY_DIAGRAM_FILE, CLASS_DIAGRAM_FILE] {
            assert!(dir.path().join(name).exists(), "{} missing", name);
        }

        let markdown = fs::read_to_string(dir.path().join(MARKDOWN_FILE)).unwrap();
        assert!(markdown.starts_with("# shop architecture"));
        assert!(markdown.contains("```mermaid\nclassDiagram"));
    }

    #[test]
    fn test_json_only_without_diagrams() {
        let dir = TempDir::new().unwrap();
        let config = config(dir.path(), OutputFormat::Json, false);
        let report = OutputWriter::new(&config).write(&analysis()).unwrap();
        assert_eq!(report.files_written, vec![dir.path().join(JSON_FILE)]);

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join(JSON_FILE)).unwrap()).unwrap();
        assert_eq!(json["project"], "shop");
        assert_eq!(json["language"], "python");
        assert_eq!(json["stats"]["classes"], 1);
        assert_eq!(json["files"][0]["classes"][0]["name"], "App");
        assert_eq!(json["lookup"]["app"], "src/app.py");
    }

    #[test]
    fn test_configured_project_name() {
        let dir = TempDir::new().unwrap();
        let mut config = config(dir.path(), OutputFormat::Markdown, false);
        config.project.name = "Storefront".to_string();
        OutputWriter::new(&config).write(&analysis()).unwrap();

        let markdown = fs::read_to_string(dir.path().join(MARKDOWN_FILE)).unwrap();
        assert!(markdown.starts_with("# Storefront architecture"));
        assert!(!markdown.contains("```mermaid"));
    }
}
