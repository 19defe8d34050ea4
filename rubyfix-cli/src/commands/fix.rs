//! Fix command implementation

use super::{batch::BatchArgs, init_logging};
use anyhow::Result;
use clap::Args;
use rubyfix_engine::{Operation, Outcome, ResplitStats};

/// Arguments for the fix command
#[derive(Debug, Args)]
pub struct FixArgs {
    #[command(flatten)]
    pub batch: BatchArgs,

    /// Suffix inserted before the extension of corrected files
    #[arg(short, long, value_name = "SUFFIX")]
    pub suffix: Option<String>,

    /// Replace corrected files from an earlier run
    #[arg(long)]
    pub overwrite: bool,
}

impl FixArgs {
    /// Execute the fix command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.batch.quiet, self.batch.verbose)?;

        log::info!("Splitting merged ruby runs");
        log::debug!("Arguments: {:?}", self);

        let config = self.batch.load_config()?;
        let mut processor_config = config.processor_config();
        if let Some(suffix) = &self.suffix {
            processor_config.output_suffix = suffix.clone();
        }
        processor_config.overwrite |= self.overwrite;

        let reports = self
            .batch
            .run(Operation::Resplit, &config, processor_config)?;

        let mut total = ResplitStats::default();
        for report in &reports {
            if let Outcome::Resplit { stats, .. } = &report.outcome {
                total.merge(stats);
            }
        }
        log::info!(
            "{} ruby run(s) split into {} run(s); {} single-segment, {} without anchor",
            total.split,
            total.runs_written,
            total.unsplittable,
            total.unresolved
        );
        Ok(())
    }
}
