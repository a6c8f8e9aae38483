use crate::error::{Error, Result};
use crate::profile::LanguageId;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub project: ProjectConfig,
    pub analysis: AnalysisConfig,
    pub output: OutputConfig,
    pub diagrams: DiagramConfig,
}

/// Project metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub name: String,
    pub description: Option<String>,
}

/// Analysis settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Forces the run language instead of detecting it from extensions
    pub language: Option<String>,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    /// Import prefixes that point inside the project (`@/components/x`)
    pub path_aliases: Vec<String>,
    /// Resolve `com.acme.Foo` style imports by their last segment
    pub resolve_qualified_imports: bool,
    /// Files above this size (bytes) are skipped
    pub max_file_size: u64,
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub directory: PathBuf,
}

/// Diagram settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagramConfig {
    pub enabled: bool,
    pub max_nodes: usize,
    pub direction: DiagramDirection,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Markdown,
    #[default]
    Both,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "markdown" | "md" => Some(OutputFormat::Markdown),
            "both" | "all" => Some(OutputFormat::Both),
            _ => None,
        }
    }

    pub fn wants_json(self) -> bool {
        matches!(self, OutputFormat::Json | OutputFormat::Both)
    }

    pub fn wants_markdown(self) -> bool {
        matches!(self, OutputFormat::Markdown | OutputFormat::Both)
    }
}

/// Mermaid flow direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum DiagramDirection {
    #[default]
    TB,
    LR,
    BT,
    RL,
}

impl DiagramDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            DiagramDirection::TB => "TB",
            DiagramDirection::LR => "LR",
            DiagramDirection::BT => "BT",
            DiagramDirection::RL => "RL",
        }
    }
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: "Untitled Project".to_string(),
            description: None,
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            language: None,
            include: vec!["**/*".to_string()],
            exclude: vec![],
            path_aliases: vec![
                "@/".to_string(),
                "~/".to_string(),
                "@app/".to_string(),
                "src/".to_string(),
            ],
            resolve_qualified_imports: true,
            max_file_size: 1024 * 1024,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            directory: PathBuf::from("./codeatlas-out"),
        }
    }
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_nodes: 60,
            direction: DiagramDirection::default(),
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from file or return defaults
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Merge CLI arguments into config (CLI takes precedence)
    #[allow(clippy::too_many_arguments)]
    pub fn merge_cli(
        &mut self,
        output: Option<PathBuf>,
        language: Option<String>,
        include: Vec<String>,
        exclude: Vec<String>,
        aliases: Vec<String>,
        format: Option<String>,
        no_diagrams: bool,
    ) {
        if let Some(out) = output {
            self.output.directory = out;
        }

        if language.is_some() {
            self.analysis.language = language;
        }

        if !include.is_empty() {
            self.analysis.include = include;
        }

        if !exclude.is_empty() {
            self.analysis.exclude.extend(exclude);
        }

        if !aliases.is_empty() {
            self.analysis.path_aliases.extend(aliases);
        }

        if let Some(fmt) = format.as_deref().and_then(OutputFormat::parse) {
            self.output.format = fmt;
        }

        if no_diagrams {
            self.diagrams.enabled = false;
        }
    }

    /// The forced run language, if any
    pub fn forced_language(&self) -> Option<LanguageId> {
        self.analysis.language.as_deref().map(LanguageId::from_name)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.diagrams.max_nodes == 0 {
            return Err(Error::config_validation("diagram max_nodes must be at least 1"));
        }

        if self.analysis.include.is_empty() {
            return Err(Error::config_validation("at least one include pattern required"));
        }

        if self.analysis.max_file_size == 0 {
            return Err(Error::config_validation("max_file_size must be positive"));
        }

        if let Some(name) = &self.analysis.language {
            if LanguageId::from_name(name) == LanguageId::Unknown {
                return Err(Error::config_validation(format!("unknown language: {}", name)));
            }
        }

        for alias in &self.analysis.path_aliases {
            if alias.is_empty() || alias.starts_with('.') {
                return Err(Error::config_validation(format!(
                    "path alias '{}' must be non-empty and not relative",
                    alias
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.project.name, "Untitled Project");
        assert!(config.diagrams.enabled);
        assert_eq!(config.output.format, OutputFormat::Both);
        assert!(config.analysis.path_aliases.contains(&"@/".to_string()));
        assert!(config.analysis.resolve_qualified_imports);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_valid_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r##"
[project]
name = "Storefront"

[analysis]
language = "typescript"
path_aliases = ["@/", "#lib/"]

[output]
format = "json"

[diagrams]
enabled = false
direction = "LR"
"##
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.project.name, "Storefront");
        assert_eq!(config.forced_language(), Some(LanguageId::TypeScript));
        assert_eq!(config.analysis.path_aliases, vec!["@/", "#lib/"]);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(!config.diagrams.enabled);
        assert_eq!(config.diagrams.direction, DiagramDirection::LR);
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load(Path::new("/nonexistent/codeatlas.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_or_default_falls_back() {
        let config = Config::load_or_default(Path::new("/nonexistent/codeatlas.toml"));
        assert_eq!(config.project.name, "Untitled Project");
    }

    #[test]
    fn test_validation_unknown_language() {
        let mut config = Config::default();
        config.analysis.language = Some("cobol".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_empty_include() {
        let mut config = Config::default();
        config.analysis.include.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_relative_alias() {
        let mut config = Config::default();
        config.analysis.path_aliases.push("./".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_nodes() {
        let mut config = Config::default();
        config.diagrams.max_nodes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_merge_cli_overrides() {
        let mut config = Config::default();
        config.merge_cli(
            Some(PathBuf::from("/tmp/atlas")),
            Some("py".to_string()),
            vec!["src/**".to_string()],
            vec!["migrations/**".to_string()],
            vec!["$lib/".to_string()],
            Some("md".to_string()),
            true,
        );
        assert_eq!(config.output.directory, PathBuf::from("/tmp/atlas"));
        assert_eq!(config.forced_language(), Some(LanguageId::Python));
        assert_eq!(config.analysis.include, vec!["src/**"]);
        assert_eq!(config.analysis.exclude, vec!["migrations/**"]);
        assert!(config.analysis.path_aliases.contains(&"$lib/".to_string()));
        assert_eq!(config.output.format, OutputFormat::Markdown);
        assert!(!config.diagrams.enabled);
    }

    #[test]
    fn test_merge_cli_unknown_format_keeps_default() {
        let mut config = Config::default();
        config.merge_cli(None, None, vec![], vec![], vec![], Some("html".to_string()), false);
        assert_eq!(config.output.format, OutputFormat::Both);
    }

    #[test]
    fn test_output_format_helpers() {
        assert!(OutputFormat::Both.wants_json());
        assert!(OutputFormat::Both.wants_markdown());
        assert!(!OutputFormat::Json.wants_markdown());
        assert!(!OutputFormat::Markdown.wants_json());
    }
}
