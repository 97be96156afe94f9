//! # inilayer-cli
//!
//! Inspect and edit layered INI configuration from the terminal.
//!
//! This is the main entry point for the inilayer CLI tool. It handles command
//! parsing, sets up logging and error handling, loads the configuration
//! sources and dispatches to the appropriate command handlers.

use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use inilayer_config::ValueKind;
use tracing::{error, info};

mod commands;
mod output;

use commands::CommandContext;
use output::errors::ErrorFormatter;

/// Inspect and edit layered INI configuration
#[derive(Parser)]
#[command(name = "inilayer", version, about = "Typed, layered INI configuration")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Primary configuration file
    #[arg(short, long, global = true, env = "INILAYER_CONFIG", default_value = "config.conf")]
    pub config: Utf8PathBuf,

    /// Override file, applied after the primary one (repeatable)
    #[arg(short, long = "overlay", global = true, value_name = "FILE")]
    pub overlays: Vec<Utf8PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List loaded sources in override order
    Sources,
    /// Print merged values
    Show {
        /// Only print this kind
        #[arg(short, long)]
        kind: Option<ValueKind>,
        /// Print JSON instead of INI-style text
        #[arg(long)]
        json: bool,
    },
    /// Print one merged value
    Get {
        key: String,
        /// Kind to read; defaults to the first kind that has the key
        #[arg(short, long)]
        kind: Option<ValueKind>,
    },
    /// Write a value and flush it to disk
    Set {
        key: String,
        /// Value text; may start with '-' (negative numbers)
        #[arg(allow_hyphen_values = true)]
        value: String,
        /// Kind (and section) of the value
        #[arg(short, long)]
        kind: ValueKind,
        /// Write to this source instead of every source that has the key
        #[arg(short, long)]
        target: Option<Utf8PathBuf>,
        /// Fail when no source matches instead of ignoring the write
        #[arg(long)]
        strict: bool,
        /// Apply in memory only
        #[arg(long)]
        dry_run: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose);
    setup_panic_handler();

    info!("Starting inilayer v{}", env!("CARGO_PKG_VERSION"));

    match run_cli(cli) {
        Ok(code) => code,
        Err(err) => {
            eprint!("{}", ErrorFormatter::new().format_report(&err));
            ExitCode::FAILURE
        }
    }
}

fn run_cli(cli: Cli) -> anyhow::Result<ExitCode> {
    let mut ctx = CommandContext::load(&cli.config, &cli.overlays)?;
    commands::dispatch_command(cli.command, &mut ctx)
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "inilayer_cli={},inilayer_config={},inilayer_core={}",
            level, level, level
        ))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        error!("inilayer encountered an unexpected error: {}", panic_info);
        eprintln!("inilayer crashed! This is a bug.");
        eprintln!("Error: {}", panic_info);
    }));
}
