use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;

use rccr_core::{PolishError, PolishOutcome, PolishRequest, Polisher, PresetCatalog, TextRefiner};
use rccr_corrector::{create_corrector, CorrectorType};
use rccr_critic::CritiqueEngine;
use rccr_logging::{init_tracing, LogFormat, Logger};

mod config;
mod init;
mod interactive;

use config::{load_config, RccrConfig};

/// Exit code when the request has no text to refine
const EXIT_EMPTY_INPUT: i32 = 2;

#[derive(Parser, Debug)]
#[command(
    name = "rccr",
    about = "Role, constraints, critique, refine: polish raw text",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Working directory holding rccr.toml (default: current directory)
    #[arg(short = 'd', long, global = true)]
    working_dir: Option<PathBuf>,

    /// Log output format
    #[arg(long, value_enum, default_value = "pretty", global = true)]
    log_format: LogFormatChoice,

    /// Tracing filter (overridden by RUST_LOG)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    /// Also append JSON log events to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List task presets
    Presets,
    /// Show the role and constraints of a task preset
    Preset {
        /// Preset name
        name: String,
        /// Output as JSON
        #[arg(long)]
        json_output: bool,
    },
    /// Critique and refine text (interactive when no text is given)
    Polish(PolishArgs),
    /// Write a global config with your preferred corrector
    Init,
}

#[derive(Args, Debug, Default)]
struct PolishArgs {
    /// Task preset to take role and constraints from (default: first preset)
    #[arg(short, long)]
    preset: Option<String>,

    /// Role, overriding the preset's
    #[arg(long)]
    role: Option<String>,

    /// Constraints, overriding the preset's
    #[arg(long)]
    constraints: Option<String>,

    /// Raw text to polish
    #[arg(short, long, conflicts_with = "text_file")]
    text: Option<String>,

    /// Read the raw text from a file ("-" for stdin)
    #[arg(long)]
    text_file: Option<PathBuf>,

    /// Spelling corrector to use
    #[arg(long, value_enum)]
    corrector: Option<CorrectorChoice>,

    /// Word frequency list for the dictionary corrector
    #[arg(long)]
    dictionary: Option<PathBuf>,

    /// Output the result as JSON
    #[arg(long)]
    json_output: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CorrectorChoice {
    Dictionary,
    Command,
    None,
}

impl From<CorrectorChoice> for CorrectorType {
    fn from(choice: CorrectorChoice) -> Self {
        match choice {
            CorrectorChoice::Dictionary => CorrectorType::Dictionary,
            CorrectorChoice::Command => CorrectorType::Command,
            CorrectorChoice::None => CorrectorType::Passthrough,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormatChoice {
    Pretty,
    Json,
    Compact,
}

impl From<LogFormatChoice> for LogFormat {
    fn from(choice: LogFormatChoice) -> Self {
        match choice {
            LogFormatChoice::Pretty => LogFormat::Pretty,
            LogFormatChoice::Json => LogFormat::Json,
            LogFormatChoice::Compact => LogFormat::Compact,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_format: LogFormat = cli.log_format.into();
    init_tracing(&cli.log_level, log_format);

    let working_dir = match cli.working_dir {
        Some(ref dir) => dir.clone(),
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    match cli.command {
        Some(Commands::Init) => init::handle_init(),
        Some(Commands::Presets) => {
            let config = load_config(&working_dir)?;
            let catalog = build_catalog(&config)?;
            for name in catalog.keys() {
                println!("{}", name);
            }
            Ok(())
        }
        Some(Commands::Preset { ref name, json_output }) => {
            let config = load_config(&working_dir)?;
            let catalog = build_catalog(&config)?;
            let preset = catalog.get(name)?;
            if json_output {
                println!("{}", serde_json::to_string_pretty(preset)?);
            } else {
                println!("{}", preset.name.bold());
                println!();
                println!("{}", "Role:".dimmed());
                println!("{}", preset.role);
                println!();
                println!("{}", "Constraints:".dimmed());
                println!("{}", preset.constraints);
            }
            Ok(())
        }
        Some(Commands::Polish(ref args)) => run_polish(&cli, args, &working_dir),
        None => run_polish(&cli, &PolishArgs::default(), &working_dir),
    }
}

fn build_catalog(config: &RccrConfig) -> Result<PresetCatalog> {
    PresetCatalog::with_presets(config.task_presets()).context("Invalid presets in config")
}

fn run_polish(cli: &Cli, args: &PolishArgs, working_dir: &Path) -> Result<()> {
    let config = load_config(working_dir)?;
    let catalog = build_catalog(&config)?;

    let settings =
        config.corrector_settings(args.corrector.map(Into::into), args.dictionary.clone())?;
    let corrector = create_corrector(&settings).context("Failed to set up corrector")?;
    if !corrector.is_available() {
        anyhow::bail!(
            "Corrector '{}' is not available. Make sure it's installed and in PATH.",
            corrector.name()
        );
    }

    let request = if args.text.is_none() && args.text_file.is_none() {
        interactive::collect_request(
            &catalog,
            args.preset.as_deref(),
            args.role.as_deref(),
            args.constraints.as_deref(),
        )?
    } else {
        build_request(&catalog, args)?
    };

    let logger = match cli.log_file {
        Some(ref path) => Logger::with_file(cli.log_format.into(), path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?,
        None => Logger::new(cli.log_format.into()),
    };

    let refiner = TextRefiner::new(corrector);
    let critic = CritiqueEngine::new();
    let polisher = Polisher::new(&refiner, &critic, Arc::new(logger));

    let outcome = match polisher.polish(&request) {
        Ok(outcome) => outcome,
        Err(PolishError::EmptyInput) => {
            eprintln!("{} {}", "✗".bright_red(), PolishError::EmptyInput);
            std::process::exit(EXIT_EMPTY_INPUT);
        }
        Err(e) => return Err(e.into()),
    };

    if args.json_output {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_outcome(&outcome);
    }

    Ok(())
}

fn build_request(catalog: &PresetCatalog, args: &PolishArgs) -> Result<PolishRequest> {
    let preset = match args.preset {
        Some(ref name) => catalog.get(name)?,
        None => catalog
            .first()
            .ok_or_else(|| anyhow::anyhow!("No task presets registered"))?,
    };

    let raw_text = match (&args.text, &args.text_file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => read_text(path)?,
        (None, None) => String::new(),
    };

    let mut request = PolishRequest::from_preset(preset, raw_text);
    if let Some(ref role) = args.role {
        request = request.with_role(role.clone());
    }
    if let Some(ref constraints) = args.constraints {
        request = request.with_constraints(constraints.clone());
    }
    Ok(request)
}

fn read_text(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read text from stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn print_outcome(outcome: &PolishOutcome) {
    println!("{}", "Analysis & Refined Output".bold());
    println!();
    println!("{}", "Critique".bright_magenta().bold());
    let critique = outcome.critique.render();
    if outcome.looks_good() {
        println!("{}", critique.bright_green());
    } else {
        println!("{}", critique.bright_yellow());
    }
    println!();
    println!("{}", "Refined Output".bright_cyan().bold());
    println!("{}", outcome.refined);
}
