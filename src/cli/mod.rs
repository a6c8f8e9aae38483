//! CLI module for codeatlas

mod args;

pub use args::{Args, Command};

use crate::analysis::{AnalysisResult, Analyzer};
use crate::config::{Config, OutputFormat};
use crate::error::{Error, Result};
use crate::logging;
use crate::output::OutputWriter;
use crate::parser::grammar_for;
use crate::profile::registry;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "codeatlas.toml";

/// Run the CLI application
pub fn run() -> ExitCode {
    let args = Args::parse_args();
    logging::init(args.verbose());

    match execute(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn execute(args: Args) -> Result<()> {
    match args.command {
        Command::Analyze {
            path,
            output,
            language,
            include,
            exclude,
            aliases,
            config,
            format,
            no_diagrams,
            verbose,
        } => {
            if let Some(f) = format.as_deref() {
                if OutputFormat::parse(f).is_none() {
                    return Err(Error::config_validation(format!(
                        "unknown output format '{}' (expected json, markdown or both)",
                        f
                    )));
                }
            }

            let mut cfg = load_config(config.as_deref())?;
            cfg.merge_cli(output, language, include, exclude, aliases, format, no_diagrams);
            cfg.validate()?;

            if !path.exists() {
                return Err(Error::PathNotFound(path));
            }

            let analyzer = Analyzer::new(cfg.clone())?.with_verbose(verbose);
            println!("Analyzing {}...", path.display());
            let analysis = analyzer.analyze(&path)?;
            print_summary(&analysis);

            let report = OutputWriter::new(&cfg).write(&analysis)?;
            for file in &report.files_written {
                println!("Wrote {}", file.display());
            }
            Ok(())
        }

        Command::Languages => {
            for profile in registry() {
                let status = if grammar_for(profile.id).is_some() {
                    "bundled grammar"
                } else {
                    "no grammar"
                };
                let extensions: Vec<String> = profile.extensions.iter().map(|e| format!(".{}", e)).collect();
                println!("{:<12} {:<32} {}", profile.id.as_str(), extensions.join(" "), status);
            }
            Ok(())
        }
    }
}

/// An explicit config must load; the default file is optional
fn load_config(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) if !path.exists() => Err(Error::PathNotFound(path.to_path_buf())),
        Some(path) => Config::load(path),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            if default.exists() {
                Config::load(&default)
            } else {
                Ok(Config::default())
            }
        }
    }
}

fn print_summary(analysis: &AnalysisResult) {
    let stats = analysis.model.stats();
    println!(
        "Language: {} ({} files, {} lines)",
        analysis.language, stats.files, stats.lines
    );
    println!(
        "Found {} classes, {} interfaces, {} functions, {} dependency edges",
        stats.classes, stats.interfaces, stats.functions, stats.dependency_edges
    );
    if stats.entry_points > 0 {
        println!("Entry points: {}", stats.entry_points);
    }

    if !analysis.failures.is_empty() {
        println!("\nFiles not analysed ({}):", analysis.failures.len());
        for failure in analysis.failures.iter().take(5) {
            println!("  {}: {}", failure.path.display(), failure.reason);
        }
        if analysis.failures.len() > 5 {
            println!("  ... and {} more", analysis.failures.len() - 5);
        }
    }
    if !analysis.skipped.is_empty() {
        println!("Skipped {} oversized files", analysis.skipped.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_config_missing_explicit() {
        let err = load_config(Some(Path::new("/no/such/atlas.toml"))).unwrap_err();
        assert!(matches!(err, Error::PathNotFound(_)));
    }

    #[test]
    fn test_load_config_explicit() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("atlas.toml");
        fs::write(&path, "[project]\nname = \"Shop\"\n\n[diagrams]\nmax_nodes = 10\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.project.name, "Shop");
        assert_eq!(config.diagrams.max_nodes, 10);
    }

    #[test]
    fn test_load_config_invalid() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("atlas.toml");
        fs::write(&path, "[diagrams]\nmax_nodes = 0\n").unwrap();
        assert!(load_config(Some(&path)).is_err());
    }

    #[test]
    fn test_unknown_format_rejected() {
        let args = Args::try_parse_from(["codeatlas", "analyze", ".", "--format", "html"]).unwrap();
        let err = execute(args).unwrap_err();
        assert!(err.to_string().contains("unknown output format"));
    }
}
