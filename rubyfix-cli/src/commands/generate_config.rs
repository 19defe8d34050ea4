//! Generate config command implementation

use crate::config::CONFIG_TEMPLATE;
use anyhow::{bail, Context, Result};
use clap::Args;
use std::fs;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,

    /// Replace an existing file
    #[arg(long)]
    pub force: bool,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        if self.output.exists() && !self.force {
            bail!(
                "{} already exists (use --force to replace it)",
                self.output.display()
            );
        }

        fs::write(&self.output, CONFIG_TEMPLATE)
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!(
            "✓ Configuration template written to {}",
            self.output.display()
        );
        println!();
        println!("Use it with:");
        println!(
            "   rubyfix fix -c {} -i <FILE/DIR/PATTERN>",
            self.output.display()
        );

        Ok(())
    }
}
