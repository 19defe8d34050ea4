//! CLI command implementations

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

pub mod align;
pub mod batch;
pub mod extract;
pub mod fix;
pub mod generate_config;

/// Split merged ruby (furigana) runs in Word documents
#[derive(Debug, Parser)]
#[command(name = "rubyfix", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Split merged ruby runs and write corrected copies
    Fix(fix::FixArgs),

    /// Print the text of documents as it is read
    Extract(extract::ExtractArgs),

    /// Show how a reading is split over a base text
    Align(align::AlignArgs),

    /// Write a configuration file template
    GenerateConfig(generate_config::GenerateConfigArgs),
}

impl Commands {
    /// Execute the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Fix(args) => args.execute(),
            Commands::Extract(args) => args.execute(),
            Commands::Align(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute(),
        }
    }
}

/// Initialize logging based on verbosity level
///
/// `RUST_LOG` overrides the level picked from `verbose`.
pub fn init_logging(quiet: bool, verbose: u8) -> Result<()> {
    if quiet {
        return Ok(());
    }

    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .try_init()
        .context("Failed to initialize logging")
}
