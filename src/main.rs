//! policy-diff: clause-level version diff and field comparison for
//! insurance policy documents.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use policy_diff::{
    cli,
    config::{AppConfig, CONFIG_FILE_NAMES},
    pipeline::exit_codes,
    reports::ReportFormat,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "policy-diff")]
#[command(version)]
#[command(about = "Clause-level diff and field comparison for insurance policies", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  No changes detected (or changes without --fail-on-change)
    1  Changes detected / waiting period not yet elapsed
    3  Error occurred (including duplicate clause ids in `validate`)

EXAMPLES:
    # What changed between two versions of a policy
    policy-diff diff policy_v1.json policy_v2.json

    # Fail a CI job when wording changes
    policy-diff diff v1.json v2.json --fail-on-change -o json > diff.json

    # Compare plans field by field
    policy-diff compare gold.json silver.json platinum.yaml -o side-by-side

    # Check a maternity claim
    policy-diff eligibility --start 2024-01-01 --date 2025-06-01 --treatment maternity")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true, env = "POLICY_DIFF_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for the `diff` subcommand
#[derive(Parser)]
struct DiffArgs {
    /// Path to the old clause snapshot
    old: PathBuf,

    /// Path to the new clause snapshot
    new: PathBuf,

    /// Output format (auto picks by output file extension, else summary)
    #[arg(short, long, default_value = "auto")]
    output: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Do not compute word-level highlights for modified clauses
    #[arg(long)]
    no_highlight: bool,

    /// Exit with code 1 if any clause changed
    #[arg(long)]
    fail_on_change: bool,
}

/// Arguments for the `compare` subcommand
#[derive(Parser)]
struct CompareArgs {
    /// Plan documents to compare (two or more)
    #[arg(required = true, num_args = 2..)]
    documents: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "auto")]
    output: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// YAML field schema replacing the built-in field table
    #[arg(long)]
    schema: Option<PathBuf>,

    /// Exit with code 1 if any field differs
    #[arg(long)]
    fail_on_change: bool,
}

/// Arguments for the `normalize` subcommand
#[derive(Parser)]
struct NormalizeArgs {
    /// Policy document to normalize
    document: PathBuf,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// YAML field schema replacing the built-in field table
    #[arg(long)]
    schema: Option<PathBuf>,
}

/// Arguments for the `validate` subcommand
#[derive(Parser)]
struct ValidateArgs {
    /// Clause snapshot to check
    snapshot: PathBuf,

    /// Emit the result as JSON
    #[arg(long)]
    json: bool,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

/// Arguments for the `eligibility` subcommand
#[derive(Parser)]
struct EligibilityArgs {
    /// Policy start date (YYYY-MM-DD)
    #[arg(long)]
    start: String,

    /// Hospitalization date (YYYY-MM-DD)
    #[arg(long = "date")]
    hospitalization: String,

    /// Treatment kind, e.g. general, surgery, maternity
    #[arg(long, default_value = "general")]
    treatment: String,

    /// Output format (json, or text for anything else)
    #[arg(short, long, default_value = "auto")]
    output: ReportFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two versions of a policy clause by clause
    Diff(DiffArgs),

    /// Compare normalized fields of two or more plans
    Compare(CompareArgs),

    /// Print the normalized comparison record of one document
    Normalize(NormalizeArgs),

    /// Check a clause snapshot for duplicate or non-standard ids
    Validate(ValidateArgs),

    /// Check whether a treatment's waiting period has elapsed
    Eligibility(EligibilityArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .policy-diff.yaml in the current directory
    Init,
}

/// Layer CLI flags over the discovered config file and validate the result.
fn effective_config(cli: &Cli, overrides: &AppConfig) -> Result<AppConfig> {
    let (config, loaded_from) =
        AppConfig::from_file_with_overrides(cli.config.as_deref(), overrides);
    if let Some(path) = &loaded_from {
        tracing::debug!("Loaded config from {}", path.display());
    }
    cli::ensure_valid(&config)?;
    Ok(config)
}

fn exit_with(code: i32) -> Result<()> {
    if code != exit_codes::SUCCESS {
        std::process::exit(code);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    let base = AppConfig::builder().no_color(cli.no_color).quiet(cli.quiet);

    match &cli.command {
        Commands::Diff(args) => {
            let overrides = base
                .output_format(args.output)
                .output_file(args.output_file.clone())
                .highlight(!args.no_highlight)
                .fail_on_change(args.fail_on_change)
                .build();
            let config = effective_config(&cli, &overrides)?;
            exit_with(cli::run_diff(&config, &args.old, &args.new)?)
        }

        Commands::Compare(args) => {
            let overrides = base
                .output_format(args.output)
                .output_file(args.output_file.clone())
                .schema_file(args.schema.clone())
                .fail_on_change(args.fail_on_change)
                .build();
            let config = effective_config(&cli, &overrides)?;
            exit_with(cli::run_compare(&config, &args.documents)?)
        }

        Commands::Normalize(args) => {
            let overrides = base
                .output_file(args.output_file.clone())
                .schema_file(args.schema.clone())
                .build();
            let config = effective_config(&cli, &overrides)?;
            exit_with(cli::run_normalize(&config, &args.document)?)
        }

        Commands::Validate(args) => exit_with(cli::run_validate(
            &args.snapshot,
            args.json,
            args.output_file.clone(),
        )?),

        Commands::Eligibility(args) => {
            let overrides = base.output_format(args.output).build();
            let config = effective_config(&cli, &overrides)?;
            exit_with(cli::run_eligibility(
                &config,
                &args.start,
                &args.hospitalization,
                &args.treatment,
            )?)
        }

        Commands::Completions { shell } => {
            generate(*shell, &mut Cli::command(), "policy-diff", &mut io::stdout());
            Ok(())
        }

        Commands::ConfigSchema { output } => {
            let schema = policy_diff::config::generate_json_schema();
            match output {
                Some(path) => {
                    std::fs::write(path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => {
                    println!("{schema}");
                }
            }
            Ok(())
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let (config, loaded_from) =
                    policy_diff::config::load_or_default(cli.config.as_deref());
                if let Some(path) = &loaded_from {
                    eprintln!("# Loaded from: {}", path.display());
                } else {
                    eprintln!("# No config file found; showing defaults");
                }
                let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
                print!("{yaml}");
                Ok(())
            }
            ConfigAction::Path => {
                let search_paths: [Option<String>; 3] = [
                    std::env::current_dir()
                        .ok()
                        .map(|p| p.display().to_string()),
                    ::dirs::config_dir().map(|p| p.join("policy-diff").display().to_string()),
                    ::dirs::home_dir().map(|p| p.display().to_string()),
                ];
                eprintln!("Config file search paths (in order, git root after the first):");
                for path in search_paths.into_iter().flatten() {
                    eprintln!("  {path}");
                }
                eprintln!();
                eprintln!("Recognized file names:");
                for name in CONFIG_FILE_NAMES {
                    eprintln!("  {name}");
                }
                eprintln!();
                match policy_diff::config::discover_config_file(cli.config.as_deref()) {
                    Some(path) => eprintln!("Active config file: {}", path.display()),
                    None => eprintln!("No config file found."),
                }
                Ok(())
            }
            ConfigAction::Init => {
                let target = std::env::current_dir()
                    .context("cannot determine current directory")?
                    .join(".policy-diff.yaml");
                if target.exists() {
                    anyhow::bail!(
                        "{} already exists. Remove it first to re-initialize.",
                        target.display()
                    );
                }
                let content = policy_diff::config::generate_full_example_config();
                std::fs::write(&target, content)
                    .with_context(|| format!("failed to write {}", target.display()))?;
                eprintln!("Created {}", target.display());
                Ok(())
            }
        },
    }
}
