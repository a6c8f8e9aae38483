//! CLI argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Extract symbols and architecture from source trees
#[derive(Parser, Debug)]
#[command(name = "codeatlas")]
#[command(about = "Extract symbols, dependencies and architecture from source trees")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    pub fn parse_args() -> Self {
        Parser::parse()
    }

    pub fn verbose(&self) -> bool {
        matches!(self.command, Command::Analyze { verbose: true, .. })
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze a codebase and write the model and documentation
    Analyze {
        /// Path to the codebase to analyze
        path: PathBuf,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Force the language instead of detecting it
        #[arg(short, long)]
        language: Option<String>,

        /// Glob patterns to include (can be repeated)
        #[arg(long)]
        include: Vec<String>,

        /// Glob patterns to exclude (can be repeated)
        #[arg(long)]
        exclude: Vec<String>,

        /// Extra import alias prefixes (can be repeated)
        #[arg(long = "alias")]
        aliases: Vec<String>,

        /// Config file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format (json, markdown, both)
        #[arg(long)]
        format: Option<String>,

        /// Skip diagram generation
        #[arg(long)]
        no_diagrams: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// List supported languages and their extensions
    Languages,
}
