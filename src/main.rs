//! Command-line entry point for pairing a Swiss round
//!
//! Reads standings from a TOML or JSON file, adds the bye when the field is
//! odd, and prints one matchup per line.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use swiss_pairing::config::AppConfig;
use swiss_pairing::pairing::SolverKind;
use swiss_pairing::{matchups, prepare_field, render, OutputFormat, Standings, SwissPairer};
use tracing::{error, info};

/// Swiss Pairing - pair the next round of a Swiss-system tournament
#[derive(Parser)]
#[command(
    name = "swiss-pair",
    version,
    about = "Pair the next round of a Swiss-system tournament",
    long_about = "Reads current standings (points and previous opponents), avoids rematches \
                 where possible, pairs participants with similar records, and prints the \
                 matchups for the next round."
)]
struct Args {
    /// Standings file (TOML, or JSON with a .json extension)
    #[arg(value_name = "STANDINGS")]
    standings: PathBuf,

    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Matching backend override
    #[arg(long, value_name = "SOLVER", help = "Override solver (mwmatching, exhaustive)")]
    solver: Option<SolverKind>,

    /// Bye id override
    #[arg(long, value_name = "ID", help = "Override the id used for the bye")]
    bye_id: Option<String>,

    /// Output format
    #[arg(
        long,
        value_name = "FORMAT",
        default_value = "text",
        help = "Output format (text, json)"
    )]
    format: OutputFormat,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Dry run mode (validate config and standings, then exit)
    #[arg(long, help = "Validate configuration and standings and exit without pairing")]
    dry_run: bool,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from file or environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    // Apply CLI overrides
    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    if let Some(solver) = args.solver {
        config.pairing.solver = solver;
    }

    if let Some(bye_id) = &args.bye_id {
        config.pairing.bye_id = bye_id.clone();
    }

    swiss_pairing::config::validate_config(&config)?;
    Ok(config)
}

fn run(args: &Args, config: &AppConfig) -> Result<()> {
    info!("Loading standings from: {}", args.standings.display());
    let standings = Standings::from_file(&args.standings)?;
    let participants = prepare_field(standings.participants, &config.pairing.bye_id);

    let pairer = SwissPairer::from_settings(&config.pairing);

    if args.dry_run {
        swiss_pairing::pairing::validate_field(&participants)?;
        info!(
            "Dry run completed - {} participants ready to pair with {}",
            participants.len(),
            pairer.solver_name()
        );
        return Ok(());
    }

    let pairing = pairer.pair(&participants)?;
    print!("{}", render(&matchups(&participants, &pairing), args.format)?);

    Ok(())
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration (CLI args can override environment/config file)
    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    // Initialize logging early (before any other operations)
    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!(
        "{} {} (solver: {})",
        config.service.name,
        swiss_pairing::VERSION,
        config.pairing.solver
    );

    if let Err(e) = run(&args, &config) {
        error!("Pairing failed: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
