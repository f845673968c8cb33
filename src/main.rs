//! codescope: cyclomatic complexity, Halstead measures, and
//! dependency-graph metrics for Rust sources.

mod cli;
mod config;
mod file_utils;
mod report;
mod syn_walker;

use std::fs;
use std::path::Path;
use std::process::exit;

use anyhow::{Context, Result};
use clap::Parser;
use codescope_core::settings::Settings;
use codescope_core::{module_analyser, project_analyser, ModuleInput};

use crate::cli::{AnalyzeArgs, Cli, Commands, ProjectArgs};
use crate::syn_walker::{SynAst, SynWalker};

fn main() -> Result<()> {
    color_eyre::install().map_err(|e| anyhow::anyhow!("failed to install color-eyre: {e}"))?;

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("failed to set global default tracing subscriber: {e}"))?;

    let cli_args = Cli::parse();
    tracing::debug!("parsed CLI arguments: {:?}", cli_args);

    let run_result = match cli_args.command {
        Commands::Analyze(args) => run_analyze(&args),
        Commands::Project(args) => run_project(&args),
    };

    if let Err(err) = run_result {
        eprintln!("{err:?}");
        exit(1);
    }

    Ok(())
}

fn parse_rust_file(path: &Path) -> Result<SynAst> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let file = syn::parse_file(&source)
        .with_context(|| format!("failed to parse {} as Rust source", path.display()))?;
    Ok(SynAst::new(file, source.lines().count() as u32))
}

fn run_analyze(args: &AnalyzeArgs) -> Result<()> {
    let ast = parse_rust_file(&args.file)?;
    let settings = Settings {
        newmi: args.newmi,
        ..Settings::default()
    };

    let mut report = module_analyser::analyse(&ast, &SynWalker, &settings)
        .map_err(|e| anyhow::anyhow!("{e}"))
        .with_context(|| format!("failed to analyse {}", args.file.display()))?;
    report.path = args.file.display().to_string();

    println!("{}", report::render_module_report(&report, args.output)?);
    Ok(())
}

fn run_project(args: &ProjectArgs) -> Result<()> {
    let loaded_config = config::load_config(args.config.as_deref())?;
    if let Some((path, _)) = &loaded_config {
        tracing::info!("loaded configuration from {}", path.display());
    }

    let mut settings = loaded_config
        .as_ref()
        .map(|(_, config)| config.settings)
        .unwrap_or_default();
    let mut options = loaded_config
        .as_ref()
        .map(|(_, config)| config.project)
        .unwrap_or_default();

    if args.newmi {
        settings.newmi = true;
    }
    if args.no_core_size {
        options.no_core_size = true;
    }
    if args.skip_calculation {
        options.skip_calculation = true;
    }

    let mut paths = Vec::new();
    file_utils::collect_files_with_extension(&args.path, "rs", &mut paths)
        .map_err(|e| anyhow::anyhow!("{e}"))
        .with_context(|| format!("failed to walk {}", args.path.display()))?;
    paths.sort();

    let mut modules = Vec::with_capacity(paths.len());
    for path in &paths {
        let ast = parse_rust_file(path)?;
        modules.push(ModuleInput {
            ast,
            path: path.display().to_string(),
        });
    }

    tracing::info!("analysing {} module(s) under {}", modules.len(), args.path.display());

    let analysis = project_analyser::analyse(&modules, &SynWalker, &settings, &options)
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    println!("{}", report::render_project_result(&analysis, args.output)?);
    Ok(())
}
