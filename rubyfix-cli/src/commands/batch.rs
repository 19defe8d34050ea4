//! Shared batch options and the parallel file loop

use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::{resolve_inputs, ResolvedInput};
use crate::output::{create_formatter, OutputFormat, ReportWriter};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::Args;
use rayon::prelude::*;
use rubyfix_engine::{DocumentProcessor, FileReport, Operation, ProcessorConfig};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

/// Options shared by the commands that process documents
#[derive(Debug, Args)]
pub struct BatchArgs {
    /// Input files, directories or glob patterns
    #[arg(short, long, value_name = "FILE/DIR/PATTERN", required = true, num_args = 1..)]
    pub input: Vec<String>,

    /// Report file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Report format (default: from config, else text)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE", env = "RUBYFIX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Worker threads (0 = one per CPU)
    #[arg(short = 'j', long, value_name = "N")]
    pub threads: Option<usize>,

    /// Suppress progress and log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl BatchArgs {
    /// Load the configuration file, if any
    pub fn load_config(&self) -> Result<CliConfig> {
        CliConfig::load_or_default(self.config.as_deref())
    }

    /// Report format: the flag, else the configured default
    pub fn resolve_format(&self, config: &CliConfig) -> Result<OutputFormat> {
        if let Some(format) = self.format {
            return Ok(format);
        }
        <OutputFormat as clap::ValueEnum>::from_str(&config.output.default_format, true).map_err(
            |_| {
                CliError::ConfigError(format!(
                    "unknown output format '{}'",
                    config.output.default_format
                ))
                .into()
            },
        )
    }

    fn report_writer(&self) -> Result<ReportWriter> {
        let writer: ReportWriter = match &self.output {
            Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
                format!("Failed to create report file: {}", path.display())
            })?)),
            None => Box::new(io::stdout()),
        };
        Ok(writer)
    }

    /// Process every input with `operation` and write the reports
    ///
    /// Per-file failures are part of the report; only setup and report
    /// writing errors are returned.
    pub fn run(
        &self,
        operation: Operation,
        config: &CliConfig,
        processor_config: ProcessorConfig,
    ) -> Result<Vec<FileReport>> {
        let format = self.resolve_format(config)?;
        let processor = DocumentProcessor::new(processor_config)
            .map_err(|e| CliError::ProcessingError(e.to_string()))?;

        let inputs = resolve_inputs(&self.input);
        let file_count = inputs
            .iter()
            .filter(|input| matches!(input, ResolvedInput::File(_)))
            .count();

        let threads = config.worker_threads(self.threads);
        log::info!("Processing {file_count} file(s) with {threads} thread(s)");

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .context("Failed to build worker pool")?;

        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_files(file_count as u64);

        let reports: Vec<FileReport> = pool.install(|| {
            inputs
                .par_iter()
                .map(|input| match input {
                    ResolvedInput::File(path) => {
                        let report = processor.process(path, operation);
                        progress.file_completed(path);
                        report
                    }
                    ResolvedInput::Unresolved(input) => FileReport::unresolved(input),
                    ResolvedInput::Failed { input, message } => {
                        FileReport::input_failed(input, message.as_str())
                    }
                })
                .collect()
        });
        progress.finish();

        let separator = match operation {
            Operation::Resplit => "\n",
            Operation::Extract => "\n\n",
        };
        let mut formatter = create_formatter(
            format,
            self.report_writer()?,
            separator,
            config.output.pretty_json,
        );
        for report in &reports {
            formatter.format_report(report)?;
        }
        formatter.finish()?;

        let failed = reports.iter().filter(|r| !r.is_success()).count();
        if failed > 0 {
            log::warn!("{failed} of {} input(s) failed", reports.len());
        }
        Ok(reports)
    }
}
