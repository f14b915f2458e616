use anyhow::{anyhow, bail, Result};
use clap::{ArgGroup, Parser, Subcommand};
use colored::*;
use rust_decimal::Decimal;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, warn, Level};

use workoutrs::error::WorkoutRsError;
use workoutrs::import::load_packages;
use workoutrs::logging::init_logging;
use workoutrs::{
    process_package, process_packages, render, AppConfig, LogConfig, LogFormat, LogLevel,
    OutputFormat, SensorPackage, WorkoutKind,
};

/// workoutrs - Fitness tracker module
///
/// Turns raw sensor packages from swimming, running and walking workouts
/// into distance, mean speed and calorie reports.
#[derive(Parser)]
#[command(name = "workoutrs")]
#[command(version)]
#[command(about = "Workout metrics from raw sensor packages", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity of log output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Report format (text, json, csv, table)
    #[arg(short = 'f', long, global = true)]
    format: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL", global = true)]
    log_level: Option<String>,

    /// Log format (pretty, json, compact)
    #[arg(long, value_name = "FORMAT", global = true)]
    log_format: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Process the packages listed in the configuration (default)
    Demo,

    /// Process a single sensor package
    Calc {
        /// Workout type code (SWM, RUN, WLK)
        workout_type: String,

        /// Sensor values in field order (see `fields`)
        #[arg(allow_negative_numbers = true)]
        values: Vec<Decimal>,
    },

    /// Process sensor packages from a JSON or CSV file
    Batch {
        /// Input file path
        #[arg(long)]
        file: PathBuf,
    },

    /// List the sensor fields each workout type expects
    Fields {
        /// Only show this workout type code
        workout_type: Option<String>,
    },

    /// Manage the configuration file
    #[command(group(ArgGroup::new("action").required(true).args(["init", "show"])))]
    Config {
        /// Write the default configuration
        #[arg(long)]
        init: bool,

        /// Print the configuration in effect
        #[arg(long)]
        show: bool,

        /// Overwrite an existing file with --init
        #[arg(long, requires = "init")]
        force: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    if let Some(Commands::Config {
        init: true, force, ..
    }) = &cli.command
    {
        let path = cli
            .config
            .clone()
            .unwrap_or_else(AppConfig::default_config_path);
        return init_config(&path, *force);
    }

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from_file(path)?,
        None => AppConfig::load_or_default()?,
    };
    apply_log_overrides(&mut config.logging, &cli)?;
    init_logging(&config.logging)?;

    let format = match &cli.format {
        Some(name) => name.parse::<OutputFormat>()?,
        None => config.output.format,
    };

    match cli.command.unwrap_or(Commands::Demo) {
        Commands::Demo => emit(&config.packages, format),
        Commands::Calc {
            workout_type,
            values,
        } => emit(&[SensorPackage::new(workout_type, values)], format),
        Commands::Batch { file } => emit(&load_packages(&file)?, format),
        Commands::Fields { workout_type } => show_fields(workout_type.as_deref()),
        Commands::Config { .. } => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

/// Command-line log settings win over the config file, `-v` raises the result
fn apply_log_overrides(logging: &mut LogConfig, cli: &Cli) -> Result<()> {
    if let Some(level) = &cli.log_level {
        logging.level = level.parse::<LogLevel>().map_err(|e| anyhow!(e))?;
    }
    if let Some(format) = &cli.log_format {
        logging.format = format.parse::<LogFormat>().map_err(|e| anyhow!(e))?;
    }
    logging.level = logging.level.raised_by(cli.verbose);
    Ok(())
}

/// Print the report for each package, stopping at the first failure
fn emit(packages: &[SensorPackage], format: OutputFormat) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if format == OutputFormat::Text {
        // Lines already printed stay visible when a later package fails
        for package in packages {
            let info = process_package(package)?;
            render(std::slice::from_ref(&info), format, &mut out)?;
        }
    } else {
        let messages = process_packages(packages)?;
        render(&messages, format, &mut out)?;
    }

    out.flush()?;
    Ok(())
}

fn show_fields(code: Option<&str>) -> Result<()> {
    let kinds = match code {
        Some(code) => vec![code.parse::<WorkoutKind>().map_err(WorkoutRsError::from)?],
        None => WorkoutKind::ALL.to_vec(),
    };

    for kind in kinds {
        println!(
            "{} {:<14} {}",
            kind.code().cyan().bold(),
            kind.name(),
            kind.fields().join(", ").dimmed()
        );
    }
    Ok(())
}

fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Config file already exists: {} (use --force to overwrite)",
            path.display()
        );
    }

    AppConfig::default().save_to_file(path)?;
    println!(
        "{}",
        format!("✓ Wrote default configuration to {}", path.display()).green()
    );
    Ok(())
}

fn report_error(err: &anyhow::Error) {
    match err.downcast_ref::<WorkoutRsError>() {
        Some(domain) => {
            if domain.severity().to_tracing_level() == Level::ERROR {
                error!(error = %domain, "Run aborted");
            } else {
                warn!(error = %domain, "Run aborted");
            }
            eprintln!("{} {}", "error:".red().bold(), domain.user_message());
        }
        None => eprintln!("{} {:#}", "error:".red().bold(), err),
    }
}
