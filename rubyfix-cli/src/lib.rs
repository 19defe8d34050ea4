//! rubyfix CLI library
//!
//! This library provides the command-line interface for splitting merged
//! ruby runs in Word documents and extracting their read text.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;

pub use commands::{Cli, Commands};
pub use error::{CliError, CliResult};
