//! sumo-ide CLI: tune a sumo robot sketch from the command line.
//!
//! Provides five commands: `new`, `vars`, `set`, `inject`, and `strategies`.
//!
//! Each command opens the sketch, drives a [`sumo_ide_core::session::EditingSession`]
//! over it, and saves the result; the text engine itself lives in `sumo-ide-core`.

mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "sumo-ide",
    about = "Sketch editor toolkit for sumo robots: tune globals and inject strategies",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to sumo-ide.config.json (default: ./sumo-ide.config.json)
    #[arg(long, global = true, default_value = "sumo-ide.config.json")]
    config: PathBuf,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Scaffold a starter sketch
    New {
        /// Path of the sketch to create (default: the configured output file)
        path: Option<PathBuf>,

        /// Robot name shown in the sketch header
        #[arg(long, default_value = "SumoBot")]
        name: String,

        /// Strategy called from loop()
        #[arg(long, default_value = "SearchAndDestroy")]
        strategy: String,
    },

    /// List the controls extracted from a sketch
    Vars {
        /// Sketch to read
        sketch: PathBuf,

        /// Print the controls as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set one or more global variables
    Set {
        /// Sketch to edit
        sketch: PathBuf,

        /// Assignments, e.g. SEARCH_SPEED=150 STRATEGY=aggressivePursuit
        #[arg(required = true, value_parser = parse_assignment)]
        assignments: Vec<(String, String)>,

        /// Write the result here instead of overwriting the sketch
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Insert a strategy (and its dependencies) into a sketch
    Inject {
        /// Sketch to edit
        sketch: PathBuf,

        /// Strategy name (prompts when omitted)
        strategy: Option<String>,

        /// Write the result here instead of overwriting the sketch
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// List the available strategies
    Strategies,
}

fn parse_assignment(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{s}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing variable name in '{s}'"));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match cli.command {
        Commands::New {
            path,
            name,
            strategy,
        } => {
            commands::new::run(&cli.config, path.as_deref(), &name, &strategy).await?;
        }
        Commands::Vars { sketch, json } => {
            commands::vars::run(&cli.config, &sketch, json).await?;
        }
        Commands::Set {
            sketch,
            assignments,
            output,
        } => {
            commands::set::run(&cli.config, &sketch, &assignments, output.as_deref()).await?;
        }
        Commands::Inject {
            sketch,
            strategy,
            output,
        } => {
            commands::inject::run(&cli.config, &sketch, strategy.as_deref(), output.as_deref())
                .await?;
        }
        Commands::Strategies => {
            commands::strategies::run(&cli.config).await?;
        }
    }

    Ok(())
}
