mod display;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, info};
use pipeguard_core::analyzer::{self, markdown, sarif};
use pipeguard_core::config::{self, LinterConfig, DEFAULT_CONFIG_FILE};
use pipeguard_core::{AnalysisResult, RiskLevel, Scorer, WorkflowParser};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "pipeguard",
    version,
    about = "PipeGuard — CI/CD Security Linter",
    long_about = "Statically analyze CI/CD workflow definitions for leaked secrets, \
    dangerous download-and-execute commands and weak pipeline design.\n\n\
    Nothing is executed; findings are aggregated into a 0-100 risk score."
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze workflow files for security and design weaknesses
    Analyze {
        /// Path to workflow file or directory containing workflow files
        #[arg(default_value = ".github/workflows/")]
        path: PathBuf,

        /// Output format printed to stdout
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Write a Markdown report to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Scoring configuration file (defaults to ./.pipeguard.toml if present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Exit with status 1 when any workflow reaches this risk level
        #[arg(long, value_enum)]
        fail_on: Option<FailOn>,
    },

    /// Write a starter configuration file
    Init {
        /// Where to write the configuration
        #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Markdown,
    Sarif,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FailOn {
    Low,
    Medium,
    High,
}

impl From<FailOn> for RiskLevel {
    fn from(value: FailOn) -> Self {
        match value {
            FailOn::Low => RiskLevel::Low,
            FailOn::Medium => RiskLevel::Medium,
            FailOn::High => RiskLevel::High,
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Analyze {
            path,
            format,
            output,
            config,
            fail_on,
        } => cmd_analyze(&path, format, output.as_deref(), config.as_deref(), fail_on),
        Commands::Init { path, force } => cmd_init(&path, force),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn discover_workflow_files(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    if path.is_dir() {
        let pattern = format!("{}/**/*.yml", path.display());
        let mut files: Vec<PathBuf> = glob::glob(&pattern)
            .context("Failed to read glob pattern")?
            .chain(
                glob::glob(&format!("{}/**/*.yaml", path.display()))
                    .context("Failed to read glob pattern")?,
            )
            .filter_map(|r| r.ok())
            .collect();
        files.sort();
        return Ok(files);
    }

    anyhow::bail!("Path '{}' does not exist", path.display());
}

fn load_scorer(explicit: Option<&Path>) -> Result<Scorer> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !default.is_file() {
                debug!("No {} found; using default scoring", DEFAULT_CONFIG_FILE);
                return Ok(Scorer::default());
            }
            default
        }
    };

    info!("Loading configuration from {}", path.display());
    let config: LinterConfig = config::load_config(&path)?;
    let scorer = config.scorer();
    debug!(
        "Scoring weights {:?}, thresholds {:?}",
        scorer.weights(),
        scorer.thresholds()
    );
    Ok(scorer)
}

fn cmd_analyze(
    path: &Path,
    format: OutputFormat,
    output: Option<&Path>,
    config: Option<&Path>,
    fail_on: Option<FailOn>,
) -> Result<ExitCode> {
    let scorer = load_scorer(config)?;
    let files = discover_workflow_files(path)?;

    if files.is_empty() {
        anyhow::bail!(
            "No workflow files found at '{}'. \
            Make sure the path points to a YAML workflow file or directory.",
            path.display()
        );
    }

    let mut results: Vec<(PathBuf, AnalysisResult)> = Vec::with_capacity(files.len());
    for file in &files {
        let pipeline = WorkflowParser::parse_file(file)
            .with_context(|| format!("Failed to parse {}", file.display()))?;
        results.push((file.clone(), analyzer::analyze_with(&pipeline, &scorer)));
    }

    for (file, result) in &results {
        let source = file.to_string_lossy();
        match format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(result)?);
            }
            OutputFormat::Sarif => {
                let log = sarif::to_sarif(result, &source);
                println!("{}", serde_json::to_string_pretty(&log)?);
            }
            OutputFormat::Markdown => {
                print!("{}", markdown::render(result, Some(&*source)));
            }
            OutputFormat::Text => {
                display::print_analysis_result(&source, result);
            }
        }
    }

    if let Some(out_path) = output {
        let reports: Vec<String> = results
            .iter()
            .map(|(file, result)| markdown::render(result, Some(&*file.to_string_lossy())))
            .collect();
        std::fs::write(out_path, markdown::combine(&reports))
            .with_context(|| format!("Failed to write report to {}", out_path.display()))?;
        if format == OutputFormat::Text {
            println!(" Markdown report written to {}", out_path.display());
        }
    }

    if let Some(threshold) = fail_on {
        let threshold = RiskLevel::from(threshold);
        if results.iter().any(|(_, r)| r.reaches(threshold)) {
            debug!("Risk threshold {} reached", threshold);
            return Ok(ExitCode::from(1));
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn cmd_init(path: &Path, force: bool) -> Result<ExitCode> {
    if path.exists() && !force {
        anyhow::bail!(
            "'{}' already exists. Use --force to overwrite it.",
            path.display()
        );
    }
    std::fs::write(path, config::generate_default_config())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Configuration written to {}", path.display());
    Ok(ExitCode::SUCCESS)
}
