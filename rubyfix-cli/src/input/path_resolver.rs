//! Input argument resolution
//!
//! Each argument is an existing file, a directory searched recursively for
//! documents, or a glob pattern. Arguments are resolved independently so
//! that a bad one is reported without stopping the others.

use crate::error::CliError;
use glob::{glob, Pattern};
use log::debug;
use rubyfix_engine::DocumentFormat;
use std::path::{Path, PathBuf};

/// What one input argument stands for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedInput {
    /// A file to process
    File(PathBuf),
    /// The argument matched nothing
    Unresolved(String),
    /// The argument could not be expanded
    Failed {
        /// Original argument
        input: String,
        /// Error description
        message: String,
    },
}

/// Resolve every argument in order
pub fn resolve_inputs(inputs: &[String]) -> Vec<ResolvedInput> {
    inputs.iter().flat_map(|input| resolve_input(input)).collect()
}

/// Resolve a single argument
pub fn resolve_input(input: &str) -> Vec<ResolvedInput> {
    let path = Path::new(input);
    if path.is_file() {
        return vec![ResolvedInput::File(path.to_path_buf())];
    }

    let result = if path.is_dir() {
        documents_in(path)
    } else {
        matching_files(input)
    };

    match result {
        Ok(files) if files.is_empty() && !path.is_dir() => {
            vec![ResolvedInput::Unresolved(input.to_string())]
        }
        Ok(files) => {
            debug!("{input}: {} file(s)", files.len());
            files.into_iter().map(ResolvedInput::File).collect()
        }
        Err(e) => vec![ResolvedInput::Failed {
            input: input.to_string(),
            message: e.to_string(),
        }],
    }
}

/// Supported documents below `dir`, sorted
fn documents_in(dir: &Path) -> Result<Vec<PathBuf>, CliError> {
    let dir = dir
        .to_str()
        .ok_or_else(|| CliError::InvalidPattern(dir.display().to_string()))?;
    let pattern = format!("{}/**/*", Pattern::escape(dir));
    let mut files = matching_files(&pattern)?;
    files.retain(|path| DocumentFormat::is_supported(path));
    Ok(files)
}

/// Files matching a glob pattern, sorted and deduplicated
fn matching_files(pattern: &str) -> Result<Vec<PathBuf>, CliError> {
    let paths = glob(pattern).map_err(|e| CliError::InvalidPattern(format!("{pattern} ({e})")))?;

    let mut files: Vec<PathBuf> = paths
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                debug!("skipping unreadable path: {e}");
                None
            }
        })
        .filter(|path| path.is_file())
        .collect();
    files.sort();
    files.dedup();
    Ok(files)
}
