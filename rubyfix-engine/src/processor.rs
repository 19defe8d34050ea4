//! Per-file processing with error isolation
//!
//! A [`DocumentProcessor`] turns one input path into one [`FileReport`].
//! Failures never escape: they become part of the report so that a batch
//! can carry on with the remaining files.

use crate::container::DocumentSource;
use crate::error::{EngineError, Result};
use crate::extract::extract_document;
use crate::resplit::{resplit_document, ResplitStats};
use log::{info, warn};
use std::fmt;
use std::path::{Path, PathBuf};

/// Processing options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessorConfig {
    /// Inserted before the extension of written files (`song.C.docx`)
    pub output_suffix: String,
    /// Replace existing output files
    pub overwrite: bool,
    /// Show colored ruby runs as `[base](reading)` when extracting
    pub mark_colored_runs: bool,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            output_suffix: "C".to_string(),
            overwrite: false,
            mark_colored_runs: true,
        }
    }
}

impl ProcessorConfig {
    /// Check that the options describe a usable output naming scheme
    pub fn validate(&self) -> Result<()> {
        if self.output_suffix.is_empty() {
            return Err(EngineError::Config(
                "output suffix must not be empty".to_string(),
            ));
        }
        if self
            .output_suffix
            .chars()
            .any(|c| std::path::is_separator(c) || c.is_control())
        {
            return Err(EngineError::Config(format!(
                "output suffix '{}' is not a valid file name part",
                self.output_suffix
            )));
        }
        Ok(())
    }
}

/// What to do with each document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Split merged ruby runs and write a corrected copy
    Resplit,
    /// Collect the read text
    Extract,
}

/// Result of processing one input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A corrected copy was written
    Resplit {
        /// Written file
        target: PathBuf,
        /// Run counters
        stats: ResplitStats,
    },
    /// Text was extracted
    Extracted {
        /// One line per body paragraph
        text: String,
    },
    /// The file could not be processed
    Failed {
        /// Error description
        message: String,
    },
    /// An input argument matched no file
    Unresolved,
    /// An input argument could not be expanded
    InputFailed {
        /// Error description
        message: String,
    },
}

/// Report for one file or input argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    /// File path, or the input argument for input-level outcomes
    pub path: PathBuf,
    /// What happened
    pub outcome: Outcome,
}

impl FileReport {
    /// Report for an input argument that matched nothing
    pub fn unresolved(input: impl Into<PathBuf>) -> Self {
        Self {
            path: input.into(),
            outcome: Outcome::Unresolved,
        }
    }

    /// Report for an input argument that could not be expanded
    pub fn input_failed(input: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            path: input.into(),
            outcome: Outcome::InputFailed {
                message: message.into(),
            },
        }
    }

    /// Whether the file was processed
    pub fn is_success(&self) -> bool {
        matches!(
            self.outcome,
            Outcome::Resplit { .. } | Outcome::Extracted { .. }
        )
    }
}

impl fmt::Display for FileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.path.display();
        match &self.outcome {
            Outcome::Resplit { .. } => write!(f, "[Success processing file '{path}']"),
            Outcome::Extracted { text } => f.write_str(text),
            Outcome::Failed { message } => {
                write!(f, "[Error processing file '{path}': {message}]")
            }
            Outcome::Unresolved => write!(f, "[Unable to process '{path}']"),
            Outcome::InputFailed { message } => {
                write!(f, "[Error processing '{path}': {message}]")
            }
        }
    }
}

/// Applies an [`Operation`] to documents on disk
#[derive(Debug, Clone, Default)]
pub struct DocumentProcessor {
    config: ProcessorConfig,
}

impl DocumentProcessor {
    /// Create a processor, validating the configuration
    pub fn new(config: ProcessorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration
    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Output path for a corrected copy of `path`: `<stem>.<suffix>.<ext>`
    pub fn target_path(&self, path: &Path) -> PathBuf {
        let stem = path.file_stem().unwrap_or_default().to_string_lossy();
        let mut name = format!("{stem}.{}", self.config.output_suffix);
        if let Some(ext) = path.extension() {
            name.push('.');
            name.push_str(&ext.to_string_lossy());
        }
        path.with_file_name(name)
    }

    /// Split merged ruby runs in `path` and write the corrected copy
    pub fn resplit_file(&self, path: &Path) -> Result<(PathBuf, ResplitStats)> {
        let source = DocumentSource::open(path)?;
        let part = source.document_part()?;
        let (rewritten, stats) = resplit_document(&part, source.format().layout())?;

        let target = self.target_path(path);
        source.save_as(&target, &rewritten, self.config.overwrite)?;
        Ok((target, stats))
    }

    /// Extract the read text of `path`
    pub fn extract_file(&self, path: &Path) -> Result<String> {
        let source = DocumentSource::open(path)?;
        let part = source.document_part()?;
        extract_document(&part, source.format().layout(), self.config.mark_colored_runs)
    }

    /// Run `operation` on `path`, capturing any failure in the report
    pub fn process(&self, path: &Path, operation: Operation) -> FileReport {
        let outcome = match operation {
            Operation::Resplit => self
                .resplit_file(path)
                .map(|(target, stats)| Outcome::Resplit { target, stats }),
            Operation::Extract => self
                .extract_file(path)
                .map(|text| Outcome::Extracted { text }),
        };

        let outcome = match outcome {
            Ok(outcome) => {
                if let Outcome::Resplit { target, stats } = &outcome {
                    info!(
                        "{} -> {}: {} of {} ruby run(s) split",
                        path.display(),
                        target.display(),
                        stats.split,
                        stats.candidates
                    );
                }
                outcome
            }
            Err(e) => {
                warn!("{}: {e}", path.display());
                Outcome::Failed {
                    message: e.to_string(),
                }
            }
        };

        FileReport {
            path: path.to_path_buf(),
            outcome,
        }
    }
}
