//! Align command implementation
//!
//! Runs the re-alignment on a single base/reading pair, which is handy for
//! checking how a merged run will be split before touching any document.

use crate::output::OutputFormat;
use anyhow::{Context, Result};
use clap::Args;
use rubyfix_core::{realign, RubySegment};
use std::io::{self, Write};

/// Arguments for the align command
#[derive(Debug, Args)]
pub struct AlignArgs {
    /// Base text of the merged run
    #[arg(short, long, value_name = "TEXT")]
    pub base: String,

    /// Combined reading of the merged run
    #[arg(short, long, value_name = "TEXT")]
    pub reading: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl AlignArgs {
    /// Execute the align command
    pub fn execute(&self) -> Result<()> {
        let segments = realign(&self.base, &self.reading)
            .with_context(|| format!("Cannot split '{}'", self.base))?;

        let stdout = io::stdout();
        let mut out = stdout.lock();
        write_segments(&mut out, &segments, self.format)?;
        out.flush()?;
        Ok(())
    }
}

fn write_segments<W: Write>(out: &mut W, segments: &[RubySegment], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for segment in segments {
                if segment.is_anchor() {
                    writeln!(out, "{}", segment.text)?;
                } else {
                    writeln!(out, "{}\t{}", segment.text, segment.reading)?;
                }
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, segments)?;
            writeln!(out)?;
        }
        OutputFormat::Markdown => {
            writeln!(out, "| Text | Reading | Category |")?;
            writeln!(out, "|------|---------|----------|")?;
            for segment in segments {
                writeln!(
                    out,
                    "| {} | {} | {:?} |",
                    segment.text, segment.reading, segment.category
                )?;
            }
        }
    }
    Ok(())
}
