use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for `codescope`.
#[derive(Parser, Debug)]
#[command(
    name = "codescope",
    about = "Cyclomatic complexity, Halstead measures, and dependency-graph metrics for Rust sources"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyse a single Rust source file and print its module report.
    Analyze(AnalyzeArgs),
    /// Analyse every `.rs` file under a directory as one project and print
    /// the dependency-graph summary alongside each module's report.
    Project(ProjectArgs),
}

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Path to the Rust source file to analyse.
    pub file: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Remap the maintainability index to a 0-100 scale.
    #[arg(long)]
    pub newmi: bool,
}

#[derive(Args, Debug)]
pub struct ProjectArgs {
    /// Directory to scan for `.rs` files. Defaults to `./src`.
    #[arg(default_value = "src")]
    pub path: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Path to a `codescope.toml` configuration file. If omitted, one is
    /// discovered by searching upward from the current directory.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Skip the visibility matrix and core-size computation.
    #[arg(long)]
    pub no_core_size: bool,

    /// Return per-module reports without computing the dependency graph or
    /// project averages.
    #[arg(long)]
    pub skip_calculation: bool,

    /// Remap the maintainability index to a 0-100 scale.
    #[arg(long)]
    pub newmi: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
}
