//! ucatable CLI — the main entry point.
//!
//! Commands:
//! - `table`    — Build and print the context table of an action
//! - `text`     — Print UCA, constraint, or scenario sentences
//! - `actions`  — List the actions of a model with their indices
//! - `select`   — Show what selecting a table cell highlights
//! - `config`   — Show or validate the configuration

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "ucatable",
    about = "ucatable — context tables and UCA text for STPA rule models",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build and print the context table of an action
    Table {
        /// Model file (.json or .toml)
        model: PathBuf,

        /// Index of the action in the model's action list
        #[arg(short, long, default_value_t = 0)]
        action: usize,

        /// Display mode: provided, notProvided, or both
        #[arg(short, long, env = "UCATABLE_MODE")]
        mode: Option<String>,

        /// Print the table and diagnostics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print generated sentences for every rule and free-text UCA
    Text {
        /// Model file (.json or .toml)
        model: PathBuf,

        /// Sentence variant: uca, constraint, or scenario
        #[arg(long, default_value = "uca")]
        variant: String,

        /// Verb tense of context clauses: present or past
        #[arg(long)]
        tense: Option<String>,

        /// Print the completions as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the actions of a model with their indices
    Actions {
        /// Model file (.json or .toml)
        model: PathBuf,
    },

    /// Show the rules and hazards behind a table cell
    Select {
        /// Model file (.json or .toml)
        model: PathBuf,

        /// Index of the action in the model's action list
        #[arg(short, long, default_value_t = 0)]
        action: usize,

        /// Display mode: provided, notProvided, or both
        #[arg(short, long, env = "UCATABLE_MODE")]
        mode: Option<String>,

        /// Row index (0-based)
        #[arg(long)]
        row: usize,

        /// Hazard cell index within the row (0-based)
        #[arg(long)]
        cell: usize,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Validate the configuration file
    Validate,
    /// Print the configuration file path
    Path,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Table {
            model,
            action,
            mode,
            json,
        } => commands::table::run(&model, action, mode.as_deref(), json)?,
        Commands::Text {
            model,
            variant,
            tense,
            json,
        } => commands::text::run(&model, &variant, tense.as_deref(), json)?,
        Commands::Actions { model } => commands::actions::run(&model)?,
        Commands::Select {
            model,
            action,
            mode,
            row,
            cell,
        } => commands::select::run(&model, action, mode.as_deref(), row, cell)?,
        Commands::Config { command } => match command {
            ConfigCommands::Show => commands::config_cmd::show()?,
            ConfigCommands::Validate => commands::config_cmd::validate()?,
            ConfigCommands::Path => commands::config_cmd::path()?,
        },
    }

    Ok(())
}
