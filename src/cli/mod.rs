//! Command-line interface.
//!
//! Clap command structures, output formatting, and the command
//! implementations behind each subcommand.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod commands;
pub mod output;

use commands::run::RunArgs;
use commands::signatures::SignaturesArgs;

#[derive(Parser)]
#[command(name = "testforge")]
#[command(about = "Generates, compiles, and runs C unit tests with an LLM oracle", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the configuration file
    #[arg(long, global = true, default_value = ".testforge/config.yaml")]
    pub config: PathBuf,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate, compile, and run tests for every prototype in a header
    Run(RunArgs),

    /// Preview the prototypes a header scan would target
    Signatures(SignaturesArgs),
}

/// Print a command failure and exit nonzero.
pub fn handle_error(err: anyhow::Error, json_mode: bool) {
    if json_mode {
        let body = serde_json::json!({ "error": format!("{err:#}") });
        eprintln!("{body}");
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1);
}
