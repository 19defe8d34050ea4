//! Configuration module
//!
//! Values come from an optional TOML file; command-line flags override them.

use crate::error::CliError;
use anyhow::{Context, Result};
use rubyfix_engine::ProcessorConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,

    /// Extraction configuration
    #[serde(default)]
    pub extract: ExtractConfig,

    /// Performance configuration
    #[serde(default)]
    pub performance: PerformanceConfig,
}

/// Output-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutputConfig {
    /// Inserted before the extension of corrected files
    pub suffix: String,

    /// Replace existing corrected files
    pub overwrite: bool,

    /// Default report format
    pub default_format: String,

    /// Pretty print JSON output
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            suffix: "C".to_string(),
            overwrite: false,
            default_format: "text".to_string(),
            pretty_json: true,
        }
    }
}

/// Extraction-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ExtractConfig {
    /// Write colored ruby runs as `[base](reading)`
    pub mark_colored_runs: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            mark_colored_runs: true,
        }
    }
}

/// Performance-related configuration
#[derive(Debug, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Number of worker threads (0 = auto)
    pub worker_threads: usize,
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| CliError::ConfigError(e.to_string()).into())
    }

    /// Load `path` if given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Engine options derived from this configuration
    pub fn processor_config(&self) -> ProcessorConfig {
        ProcessorConfig {
            output_suffix: self.output.suffix.clone(),
            overwrite: self.output.overwrite,
            mark_colored_runs: self.extract.mark_colored_runs,
        }
    }

    /// Worker threads to use, resolving 0 to the number of CPUs
    pub fn worker_threads(&self, requested: Option<usize>) -> usize {
        match requested.unwrap_or(self.performance.worker_threads) {
            0 => num_cpus::get(),
            n => n,
        }
    }
}

/// Commented template written by `generate-config`
pub const CONFIG_TEMPLATE: &str = r#"# rubyfix configuration
#
# Every key is optional; command-line flags take precedence.

[output]
# Corrected files are written next to the input as <stem>.<suffix>.<ext>
suffix = "C"

# Replace corrected files left over from an earlier run
overwrite = false

# Report format: "text", "json" or "markdown"
default_format = "text"

# Indent JSON reports
pretty_json = true

[extract]
# Show ruby runs with a color set as [base](reading)
mark_colored_runs = true

[performance]
# Files processed in parallel (0 = one per CPU)
worker_threads = 0
"#;
