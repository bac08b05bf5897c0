use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use log::{debug, warn};
use serde_json::Value;

use oas_core::config::{self, CONFIG_FILE_NAME, OasConfig, OutputFormat};
use oas_core::inspect::DocumentSummary;
use oas_core::parse::{self, Document};

#[derive(Parser)]
#[command(name = "oas", about = "Swagger 2 / OpenAPI 3 document resolver", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve every reference in a document and report what it contains
    Validate {
        /// Path to the document (YAML or JSON); defaults to the configured input
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Print a summary of a resolved document
    Inspect {
        /// Path to the document (YAML or JSON); defaults to the configured input
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output format; defaults to the configured one
        #[arg(long)]
        format: Option<InspectFormat>,

        /// Print the whole resolved model instead of a summary
        #[arg(long)]
        full: bool,
    },

    /// Initialize a new oas configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

impl From<OutputFormat> for InspectFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Yaml => InspectFormat::Yaml,
            OutputFormat::Json => InspectFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { input } => cmd_validate(input),

        Commands::Inspect {
            input,
            format,
            full,
        } => cmd_inspect(input, format, full),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "oas", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<OasConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    config::load_config(&config_path).map_err(|e| anyhow::anyhow!(e))
}

fn load_document(path: &Path, cfg: &OasConfig) -> Result<Document> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("yaml");
    debug!("Reading {} as {ext}", path.display());

    let value: Value = match ext {
        "json" => serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {} as JSON", path.display()))?,
        _ => serde_yaml_ng::from_str(&content)
            .with_context(|| format!("failed to parse {} as YAML", path.display()))?,
    };

    let document = match cfg.format.spec_format() {
        Some(format) => parse::from_value_as(&value, format)?,
        None => parse::from_value(&value)?,
    };
    Ok(document)
}

fn input_path(input: Option<PathBuf>, cfg: &OasConfig) -> PathBuf {
    input.unwrap_or_else(|| PathBuf::from(&cfg.input))
}

fn cmd_validate(input: Option<PathBuf>) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let input = input_path(input, &cfg);
    let document = load_document(&input, &cfg)?;
    let summary = DocumentSummary::of(&document);

    eprintln!("Valid {} document: {}", summary.format, summary.title);
    eprintln!("  Version: {}", summary.api_version);
    eprintln!("  Operations: {}", summary.operations.len());
    for (table, names) in &summary.components {
        eprintln!("  {table}: {}", names.len());
    }

    for cycle in &summary.cycles {
        warn!(
            "{} references {} at `{}` while it is still being resolved",
            cycle.schema, cycle.target, cycle.location
        );
    }
    if !summary.cycles.is_empty() {
        eprintln!("  Cycles cut: {}", summary.cycles.len());
    }

    eprintln!("Validation successful.");
    Ok(())
}

fn cmd_inspect(input: Option<PathBuf>, format: Option<InspectFormat>, full: bool) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let input = input_path(input, &cfg);
    let document = load_document(&input, &cfg)?;
    let format = format.unwrap_or_else(|| cfg.inspect.output.into());

    let value = if full {
        serde_json::to_value(&document)?
    } else {
        serde_json::to_value(DocumentSummary::of(&document))?
    };
    print_as(&value, format)
}

fn print_as(value: &Value, format: InspectFormat) -> Result<()> {
    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(value)?;
            print!("{}", yaml);
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(value)?;
            println!("{}", json);
        }
    }
    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
