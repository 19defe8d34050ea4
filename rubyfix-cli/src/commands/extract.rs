//! Extract command implementation

use super::{batch::BatchArgs, init_logging};
use anyhow::Result;
use clap::Args;
use rubyfix_engine::Operation;

/// Arguments for the extract command
#[derive(Debug, Args)]
pub struct ExtractArgs {
    #[command(flatten)]
    pub batch: BatchArgs,

    /// Print colored ruby runs like any other instead of `[base](reading)`
    #[arg(long)]
    pub no_marks: bool,
}

impl ExtractArgs {
    /// Execute the extract command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.batch.quiet, self.batch.verbose)?;

        log::info!("Extracting read text");
        log::debug!("Arguments: {:?}", self);

        let config = self.batch.load_config()?;
        let mut processor_config = config.processor_config();
        if self.no_marks {
            processor_config.mark_colored_runs = false;
        }

        self.batch
            .run(Operation::Extract, &config, processor_config)?;
        Ok(())
    }
}
